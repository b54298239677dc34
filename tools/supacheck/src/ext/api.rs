/// Define an API route from the provided literal.
///
/// - Creates the constant `ROUTE` in the current scope.
/// - Creates the function `route_url` in the current scope.
///
/// `route_url` uses `expect` to unwrap any possible URL parse errors,
/// so this macro also creates a test module (named `test_route`)
/// which validates that the route joins with a bare host
/// as well as with a host that carries a path prefix.
macro_rules! declare_route {
    ($route:literal) => {
        const ROUTE: &str = $route;

        /// Joins the given base URL with the route provided to the `declare_route` macro.
        #[allow(clippy::expect_used)]
        fn route_url(base: &$crate::url::BaseUrl) -> url::Url {
            base.join(ROUTE).expect("route must join with base URL")
        }

    };
}

pub(crate) use declare_route;
