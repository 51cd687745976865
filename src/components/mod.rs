mod constrained;
mod host;
mod path;
mod port;
mod user_info;

pub use constrained::{
    ComponentKind, Constrained, Fragment, FragmentKind, Pass, PassKind, PathKind, Query,
    QueryKind, Scheme, SchemeKind, User, UserKind,
};
pub use host::{Host, HostType};
pub use path::Path;
pub use port::Port;
pub use user_info::UserInfo;

use crate::compat::{Cow, String};
use core::fmt;

/// Common interface of the URI component value objects
pub trait UriComponent: fmt::Display {
    /// Get the encoded value, `None` when the component is absent
    fn to_encoded(&self) -> Option<Cow<'_, str>>;

    /// Get the component as written inside a URI, delimiters included
    /// Example: "https:" for a scheme, "?q=1" for a query
    fn uri_component(&self) -> String;

    /// Check if the component is present (possibly empty)
    fn is_present(&self) -> bool {
        self.to_encoded().is_some()
    }
}
