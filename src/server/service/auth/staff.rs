use crate::{
    model::{admin::RegisterAdminDto, auth::Role},
    server::{
        data::admin::{AdminRepository, SuperAdminRepository},
        error::{auth::AuthError, AppError},
        model::admin::{Admin, RegisterAdminParams, SuperAdmin},
        service::auth::{
            password::{hash_password, verify_password},
            AuthService, SignedIn,
        },
    },
};

impl<'a> AuthService<'a> {
    /// Registers an admin. The account cannot sign in until a super admin verifies it.
    ///
    /// # Returns
    /// - `Ok(Admin)` - New unverified admin
    /// - `Err(AppError::Conflict)` - Email already registered
    pub async fn register_admin(&self, dto: RegisterAdminDto) -> Result<Admin, AppError> {
        let admin_repo = AdminRepository::new(self.db);

        if admin_repo.find_by_email(&dto.email).await?.is_some() {
            return Err(AppError::Conflict(
                "An admin with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&dto.password)?;
        let admin = admin_repo
            .create(RegisterAdminParams::from_dto(dto, password_hash))
            .await?;

        tracing::info!("Registered admin {} awaiting verification", admin.id);

        Ok(admin)
    }

    /// Signs an admin in.
    ///
    /// # Returns
    /// - `Ok(SignedIn<Admin>)` - Token and account
    /// - `Err(AuthError::InvalidCredentials)` - Unknown or deleted account, or wrong password
    /// - `Err(AuthError::AdminNotVerified)` - No super admin has verified the account
    /// - `Err(AuthError::AccountInactive)` - Account is deactivated
    pub async fn login_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignedIn<Admin>, AppError> {
        let admin = AdminRepository::new(self.db)
            .find_by_email(email)
            .await?
            .filter(|a| !a.lifecycle.is_deleted())
            .filter(|a| verify_password(password, &a.password_hash))
            .ok_or_else(|| AuthError::InvalidCredentials(email.to_string()))?;

        if !admin.is_verified {
            return Err(AuthError::AdminNotVerified(admin.id).into());
        }
        if !admin.lifecycle.is_active() {
            return Err(AuthError::AccountInactive {
                role: Role::Admin,
                id: admin.id,
            }
            .into());
        }

        Ok(SignedIn {
            token: self.tokens.issue(admin.id, Role::Admin)?,
            account: admin,
        })
    }

    /// Registers the super admin. Only one may ever exist.
    ///
    /// # Returns
    /// - `Ok(SuperAdmin)` - The new super admin
    /// - `Err(AppError::Conflict)` - A super admin is already registered
    pub async fn register_super_admin(
        &self,
        dto: RegisterAdminDto,
    ) -> Result<SuperAdmin, AppError> {
        let repo = SuperAdminRepository::new(self.db);

        if repo.exists().await? {
            return Err(AppError::Conflict("Super admin already exists".to_string()));
        }

        let password_hash = hash_password(&dto.password)?;
        let super_admin = repo
            .create(RegisterAdminParams::from_dto(dto, password_hash))
            .await?;

        tracing::info!("Registered super admin {}", super_admin.id);

        Ok(super_admin)
    }

    pub async fn login_super_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignedIn<SuperAdmin>, AppError> {
        let super_admin = SuperAdminRepository::new(self.db)
            .find_by_email(email)
            .await?
            .filter(|s| verify_password(password, &s.password_hash))
            .ok_or_else(|| AuthError::InvalidCredentials(email.to_string()))?;

        if !super_admin.is_active {
            return Err(AuthError::AccountInactive {
                role: Role::SuperAdmin,
                id: super_admin.id,
            }
            .into());
        }

        Ok(SignedIn {
            token: self.tokens.issue(super_admin.id, Role::SuperAdmin)?,
            account: super_admin,
        })
    }
}
