use crate::entities::UserRole;
use crate::error::{AppError, AppResult};
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage, HttpRequest,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// Identity attached to the request once the bearer token checks out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub role: UserRole,
}

// Path prefixes that require a bearer token
struct ProtectedPaths {
    prefix_paths: Vec<&'static str>,
    // Public paths under a protected prefix
    excluded_paths: Vec<&'static str>,
}

impl ProtectedPaths {
    fn new() -> Self {
        Self {
            prefix_paths: vec![
                "/api/auth/me",
                "/api/auth/logout",
                "/api/donations",
                "/api/expenses",
                "/api/budgets",
                "/api/members",
                "/api/pledges",
                "/api/offering-types",
                "/api/reports",
            ],
            excluded_paths: vec!["/api/offering-types/active"],
        }
    }

    fn matches(prefix: &str, path: &str) -> bool {
        path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    fn is_protected_path(&self, path: &str) -> bool {
        if self
            .excluded_paths
            .iter()
            .any(|&excluded| Self::matches(excluded, path))
        {
            return false;
        }

        self.prefix_paths
            .iter()
            .any(|&prefix| Self::matches(prefix, path))
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            protected_paths: ProtectedPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    protected_paths: ProtectedPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight requests always pass
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        // Unknown routes fall through so they answer 404 rather than 401
        if !self.protected_paths.is_protected_path(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty());

        let Some(token) = token else {
            let error = AppError::AuthError("Access token required".to_string());
            return Box::pin(async move { Err(error.into()) });
        };

        let verified = self
            .jwt_service
            .verify_token(token)
            .and_then(|claims| Ok((claims.user_id()?, claims.role)));

        match verified {
            Ok((id, role)) => {
                req.extensions_mut().insert(CurrentUser { id, role });
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(e) => {
                log::warn!("Rejected bearer token on {}: {e}", req.path());
                let error = AppError::Forbidden("Invalid or expired token".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}

pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];
/// Roles allowed to write donations, expenses and budgets.
pub const FINANCE_STAFF: &[UserRole] = &[UserRole::Admin, UserRole::Accountant];
/// Finance staff plus pastors: members, pledges and report generation.
pub const CHURCH_STAFF: &[UserRole] = &[UserRole::Admin, UserRole::Accountant, UserRole::Pastor];

/// Per-route role gate, composed after [`AuthMiddleware`] with `Route::wrap`.
#[derive(Clone, Copy)]
pub struct RequireRole {
    allowed: &'static [UserRole],
}

impl RequireRole {
    pub fn new(allowed: &'static [UserRole]) -> Self {
        Self { allowed }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleService {
            service,
            allowed: self.allowed,
        }))
    }
}

pub struct RequireRoleService<S> {
    service: S,
    allowed: &'static [UserRole],
}

impl<S, B> Service<ServiceRequest> for RequireRoleService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let current = req.extensions().get::<CurrentUser>().copied();

        let error = match current {
            None => AppError::AuthError("Access token required".to_string()),
            Some(user) if self.allowed.contains(&user.role) => {
                let fut = self.service.call(req);
                return Box::pin(fut);
            }
            Some(user) => {
                log::warn!(
                    "User {} with role {} denied {} {}",
                    user.id,
                    user.role,
                    req.method(),
                    req.path()
                );
                AppError::Forbidden("Insufficient permissions".to_string())
            }
        };

        Box::pin(async move { Err(error.into()) })
    }
}

/// Returns the authenticated user attached by `AuthMiddleware`.
pub fn current_user(req: &HttpRequest) -> AppResult<CurrentUser> {
    req.extensions()
        .get::<CurrentUser>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Access token required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_paths() {
        let paths = ProtectedPaths::new();
        assert!(paths.is_protected_path("/api/donations"));
        assert!(paths.is_protected_path("/api/donations/12"));
        assert!(paths.is_protected_path("/api/auth/me"));
        assert!(paths.is_protected_path("/api/offering-types/3"));

        assert!(!paths.is_protected_path("/api/auth/login"));
        assert!(!paths.is_protected_path("/api/health"));
        assert!(!paths.is_protected_path("/api/offering-types/active"));
        assert!(!paths.is_protected_path("/api/donationsx"));
        assert!(!paths.is_protected_path("/api/unknown"));
    }
}
