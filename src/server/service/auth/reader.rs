use crate::{
    model::{auth::Role, user::RegisterUserDto},
    server::{
        data::{user::UserRepository, user_circle::UserCircleRepository},
        error::{auth::AuthError, AppError},
        model::{
            lifecycle::Lifecycle,
            user::{CreateUserParams, SocialLoginParams, User, UserProfile},
        },
        service::auth::{
            password::{hash_password, verify_password},
            AuthService, SignedIn,
        },
    },
};

impl<'a> AuthService<'a> {
    /// Registers a reader with email and password.
    ///
    /// # Returns
    /// - `Ok(UserProfile)` - New unverified, active reader
    /// - `Err(AppError::Conflict)` - Email or mobile number already registered
    pub async fn register_user(&self, dto: RegisterUserDto) -> Result<UserProfile, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo
            .email_or_mobile_taken(&dto.email, Some(&dto.mobile_number))
            .await?
        {
            return Err(AppError::Conflict(
                "A user with this email or mobile number already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&dto.password)?;
        let user = user_repo
            .create(CreateUserParams::from_registration(dto, password_hash))
            .await?;

        tracing::info!("Registered user {}", user.id);

        Ok(UserProfile {
            user,
            memberships: Default::default(),
        })
    }

    /// Signs a reader in with email and password.
    ///
    /// Deleted accounts and accounts created through social sign-in only are treated
    /// as unknown credentials.
    ///
    /// # Returns
    /// - `Ok(SignedIn<UserProfile>)` - Token and profile
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::AccountInactive)` - Account is deactivated
    pub async fn login_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignedIn<UserProfile>, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_email(email)
            .await?
            .filter(|u| !u.lifecycle.is_deleted())
            .ok_or_else(|| AuthError::InvalidCredentials(email.to_string()))?;

        let matches = user
            .password_hash
            .as_deref()
            .is_some_and(|hash| verify_password(password, hash));
        if !matches {
            return Err(AuthError::InvalidCredentials(email.to_string()).into());
        }

        self.sign_in_user(user).await
    }

    /// Signs a reader in through a social provider.
    ///
    /// An account already linked to the provider signs straight in. An account with
    /// the same email gets the provider linked. Otherwise a verified reader is created.
    ///
    /// # Returns
    /// - `Ok(SignedIn<UserProfile>)` - Token and profile
    /// - `Err(AuthError::InvalidCredentials)` - The matching account is deleted
    /// - `Err(AuthError::AccountInactive)` - The matching account is deactivated
    pub async fn social_login(
        &self,
        params: SocialLoginParams,
    ) -> Result<SignedIn<UserProfile>, AppError> {
        let user_repo = UserRepository::new(self.db);

        let user = match user_repo.find_by_email(&params.email).await? {
            Some(user) if user.lifecycle.is_deleted() => {
                return Err(AuthError::InvalidCredentials(params.email).into());
            }
            Some(user) if user.has_provider(params.provider, &params.email) => user,
            Some(user) => {
                let mut providers = user.social_providers.clone();
                providers.push(params.provider_link());

                tracing::info!("Linked {:?} sign-in to user {}", params.provider, user.id);

                user_repo
                    .set_social_providers(user.id, &providers)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?
            }
            None => {
                let user = user_repo.create(params.into_create_params()).await?;
                tracing::info!("Created user {} from social sign-in", user.id);
                user
            }
        };

        self.sign_in_user(user).await
    }

    async fn sign_in_user(&self, user: User) -> Result<SignedIn<UserProfile>, AppError> {
        if let Lifecycle::Deactivated { .. } = user.lifecycle {
            return Err(AuthError::AccountInactive {
                role: Role::User,
                id: user.id,
            }
            .into());
        }

        let token = self.tokens.issue(user.id, Role::User)?;
        let memberships = UserCircleRepository::new(self.db)
            .memberships(user.id)
            .await?;

        Ok(SignedIn {
            token,
            account: UserProfile { user, memberships },
        })
    }
}
