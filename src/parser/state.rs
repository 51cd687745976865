/// URI scanner states, in the order of the RFC 3986 generic syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Looking for `scheme ":"`
    SchemeStart,
    /// After the scheme: either `"//" authority` or a path
    AuthorityOrPath,
    /// Inside `[ userinfo "@" ] host [ ":" port ]`
    Authority,
    Path,
    Query,
    Fragment,
    Done,
}
