use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, LoginResponse, UserResponse};
use crate::utils::{JwtService, required_text, verify_password};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let (email, password) = match (
            required_text(request.email, "email"),
            request.password.filter(|p| !p.is_empty()),
        ) {
            (Ok(email), Some(password)) => (email, password),
            _ => {
                return Err(AppError::ValidationError(
                    "Email and password required".to_string(),
                ));
            }
        };

        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.pool)
            .await?;

        let Some(user) = user else {
            log::warn!("Login failed for unknown email {email}");
            return Err(AppError::AuthError("Invalid credentials".to_string()));
        };

        if !verify_password(&password, &user.password_hash)? {
            log::warn!("Login failed for user {}: wrong password", user.id);
            return Err(AppError::AuthError("Invalid credentials".to_string()));
        }

        if !user.is_active {
            log::warn!("Login refused for deactivated user {}", user.id);
            return Err(AppError::AuthError("Account is deactivated".to_string()));
        }

        let token = self
            .jwt_service
            .generate_token(user.id, &user.email, user.role)?;

        log::info!("User {} logged in as {}", user.id, user.role);

        Ok(LoginResponse {
            user: user.into(),
            token,
        })
    }

    pub async fn me(&self, user_id: i64) -> AppResult<UserResponse> {
        users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
