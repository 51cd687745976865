//! RFC 3986 URI value objects.
//!
//! A [`Uri`] is built from validated component objects ([`Scheme`],
//! [`UserInfo`], [`Host`], [`Port`], [`Path`], [`Query`], [`Fragment`]) and
//! is never mutated in place. [`BaseUri`] resolves and relativizes references
//! and compares URIs by origin or document.
//!
//! ```
//! use urival::{BaseUri, Uri};
//!
//! let uri = Uri::parse("http://bébé.be/a/../b?q").unwrap();
//! assert_eq!(uri.to_string(), "http://xn--bb-bjab.be/a/../b?q");
//!
//! let base = BaseUri::new("http://a/b/c/d;p?q").unwrap();
//! assert_eq!(base.resolve("../../g").unwrap().to_string(), "http://a/g");
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod character_sets;
mod checkers;
mod ipv4;
mod ipv6;
mod parser;
mod scheme;
mod types;
mod uri_components;

mod base_uri;
mod components;
mod error;
mod foreign;
mod origin;
mod resolver;
mod unicode;
mod uri;

// Public API
pub use base_uri::{BaseUri, ReferenceKind};
pub use components::{
    ComponentKind, Constrained, Fragment, FragmentKind, Host, HostType, Pass, PassKind, Path,
    PathKind, Port, Query, QueryKind, Scheme, SchemeKind, UriComponent, User, UserInfo, UserKind,
};
pub use error::{Error, ErrorKind, Result};
pub use foreign::{ForeignUri, FromUri};
pub use origin::Origin;
pub use parser::{UriInput, parse_components};
pub use resolver::remove_dot_segments;
pub use unicode::idna;
pub use uri::Uri;
pub use uri_components::UriComponents;
