use std::fmt;

/// Navigation targets reachable from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ProductDetail(u64),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::ProductDetail(id) => write!(f, "/product/{}", id),
        }
    }
}
