/// Schemes with a known standard port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeType {
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    Ftps,
    Ldap,
    Ldaps,
    Ssh,
    #[default]
    Other,
}

impl SchemeType {
    /// Check if this scheme carries a tuple origin
    pub fn is_special(self) -> bool {
        matches!(
            self,
            Self::Http | Self::Https | Self::Ws | Self::Wss | Self::Ftp
        )
    }

    /// Ports that are implied by this scheme when no port is given
    pub fn standard_ports(self) -> &'static [u16] {
        match self {
            Self::Http | Self::Ws => &[80],
            Self::Https | Self::Wss => &[443],
            Self::Ftp => &[21],
            Self::Ftps => &[990, 989],
            Self::Ldap => &[389],
            Self::Ldaps => &[636],
            Self::Ssh => &[22],
            Self::Other => &[],
        }
    }

    pub fn is_standard_port(self, port: u16) -> bool {
        self.standard_ports().contains(&port)
    }
}
