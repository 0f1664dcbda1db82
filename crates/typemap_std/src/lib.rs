//! Built-in type maps for C++ standard library spellings.
//!
//! Linking this crate is enough to make its handlers visible to
//! [`TypeMapDatabase::from_inventory`](typemapdb::TypeMapDatabase::from_inventory).
//!
//! | Canonical name | Targets |
//! |----------------|---------|
//! | `std::string` | any |
//! | `std::wstring` | any |
//! | `std::nullptr_t` | any |
//! | `std::vector` | any |
//! | `std::map` | cli |

mod containers;
mod strings;

pub use containers::{StdMap, StdVector};
pub use strings::{StdNullPtr, StdString, StdWString};
