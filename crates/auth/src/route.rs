use serde::{Deserialize, Serialize};

/// Sections of the dashboard shell; also the navigation items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardSection {
    Profile,
    Services,
    Products,
    Orders,
    Promotions,
    Reviews,
    Partners,
    Contracts,
    Quotes,
}

impl DashboardSection {
    pub const ALL: [DashboardSection; 9] = [
        DashboardSection::Profile,
        DashboardSection::Services,
        DashboardSection::Products,
        DashboardSection::Orders,
        DashboardSection::Promotions,
        DashboardSection::Reviews,
        DashboardSection::Partners,
        DashboardSection::Contracts,
        DashboardSection::Quotes,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            DashboardSection::Profile => "profile",
            DashboardSection::Services => "services",
            DashboardSection::Products => "products",
            DashboardSection::Orders => "orders",
            DashboardSection::Promotions => "promotions",
            DashboardSection::Reviews => "reviews",
            DashboardSection::Partners => "partners",
            DashboardSection::Contracts => "contracts",
            DashboardSection::Quotes => "quotes",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

/// The route surface of the client.
///
/// Parsing is total: any path that does not match a known route becomes
/// [`Route::Unmatched`], which the guard bounces to business selection for
/// authenticated users and to login otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    TokenLogin,
    Register,
    VerifyEmail,
    VerifyCallback,
    Root,
    BusinessSelection,
    CreateBusiness,
    Dashboard,
    DashboardSection(DashboardSection),
    Unmatched,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        // Query strings and fragments do not participate in matching, so a
        // deep link like `/dashboard/orders?page=2` lands on its section.
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or(path)
            .trim_end_matches('/');
        match path {
            "" => Route::Root,
            "/login" => Route::Login,
            "/auth/token-login" => Route::TokenLogin,
            "/auth/register" => Route::Register,
            "/auth/verify-email" => Route::VerifyEmail,
            "/auth/verify" => Route::VerifyCallback,
            "/business-selection" => Route::BusinessSelection,
            "/create-business" => Route::CreateBusiness,
            "/dashboard" => Route::Dashboard,
            _ => match path.strip_prefix("/dashboard/") {
                Some(slug) => DashboardSection::from_slug(slug)
                    .map(Route::DashboardSection)
                    .unwrap_or(Route::Unmatched),
                None => Route::Unmatched,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::TokenLogin => "/auth/token-login".to_string(),
            Route::Register => "/auth/register".to_string(),
            Route::VerifyEmail => "/auth/verify-email".to_string(),
            Route::VerifyCallback => "/auth/verify".to_string(),
            Route::Root => "/".to_string(),
            Route::BusinessSelection => "/business-selection".to_string(),
            Route::CreateBusiness => "/create-business".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::DashboardSection(section) => format!("/dashboard/{}", section.slug()),
            Route::Unmatched => "*".to_string(),
        }
    }

    /// Public auth routes: reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Route::Login
                | Route::TokenLogin
                | Route::Register
                | Route::VerifyEmail
                | Route::VerifyCallback
        )
    }
}
