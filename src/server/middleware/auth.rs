//! Authentication and authorization guard.
//!
//! A request token is verified once, resolved into a typed [`Principal`] through the
//! repository matching its role, and checked against the named actions the endpoint
//! needs. Handlers receive the principal and never look at raw claims.

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::{
    model::auth::Role,
    server::{
        data::{
            admin::{AdminRepository, SuperAdminRepository},
            user::UserRepository,
        },
        error::{auth::AuthError, AppError},
        model::{
            admin::{Admin, SuperAdmin},
            lifecycle::Lifecycle,
            user::User,
        },
        service::auth::token::TokenService,
    },
};

/// Operations an endpoint can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetUsers,
    GetUser,
    UpdateUser,
    DeleteUser,
    ActivateUser,
    DeactivateUser,
    GetBooks,
    ManageBooks,
    GetUserBooks,
    UpdateUserBooks,
    DeleteUserBooks,
    ManageGenres,
    ViewAnalytics,
    ManageAdmins,
    ManageOwnLibrary,
    Borrow,
    InnerCircle,
    ViewGenres,
}

impl Action {
    /// Actions a reader performs on their own data.
    fn is_self_service(&self) -> bool {
        matches!(self, Self::ManageOwnLibrary | Self::Borrow | Self::InnerCircle)
    }
}

/// Whether `role` may perform `action`.
///
/// The super admin may do everything. Admins may do everything except manage other
/// admins and the reader self-service actions. Readers may only use the self-service
/// actions and browse books and genres.
pub fn permits(role: Role, action: Action) -> bool {
    match role {
        Role::SuperAdmin => true,
        Role::Admin => action != Action::ManageAdmins && !action.is_self_service(),
        Role::User => {
            action.is_self_service() || matches!(action, Action::GetBooks | Action::ViewGenres)
        }
    }
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub enum Principal {
    User(User),
    Admin(Admin),
    SuperAdmin(SuperAdmin),
}

impl Principal {
    pub fn id(&self) -> i32 {
        match self {
            Self::User(u) => u.id,
            Self::Admin(a) => a.id,
            Self::SuperAdmin(s) => s.id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::User(_) => Role::User,
            Self::Admin(_) => Role::Admin,
            Self::SuperAdmin(_) => Role::SuperAdmin,
        }
    }

    /// Actor recorded on lifecycle changes, e.g. `admin:4`.
    pub fn actor(&self) -> String {
        let kind = match self {
            Self::User(_) => "user",
            Self::Admin(_) => "admin",
            Self::SuperAdmin(_) => "superadmin",
        };
        format!("{}:{}", kind, self.id())
    }

    /// The reader account behind the principal.
    ///
    /// # Returns
    /// - `Ok(User)` - Caller is a reader
    /// - `Err(AuthError::ReaderAccountRequired)` - Caller is an admin or super admin
    pub fn into_user(self) -> Result<User, AuthError> {
        match self {
            Self::User(user) => Ok(user),
            other => Err(AuthError::ReaderAccountRequired(other.role())),
        }
    }

    fn ensure_usable(&self) -> Result<(), AuthError> {
        let inactive = || AuthError::AccountInactive {
            role: self.role(),
            id: self.id(),
        };

        match self {
            Self::User(user) => match user.lifecycle {
                Lifecycle::Active => Ok(()),
                Lifecycle::Deleted { .. } => Err(AuthError::PrincipalNotFound {
                    role: Role::User,
                    id: user.id,
                }),
                Lifecycle::Deactivated { .. } => Err(inactive()),
            },
            Self::Admin(admin) => {
                if admin.lifecycle.is_deleted() {
                    Err(AuthError::PrincipalNotFound {
                        role: Role::Admin,
                        id: admin.id,
                    })
                } else if !admin.is_verified {
                    Err(AuthError::AdminNotVerified(admin.id))
                } else if !admin.lifecycle.is_active() {
                    Err(inactive())
                } else {
                    Ok(())
                }
            }
            Self::SuperAdmin(super_admin) if !super_admin.is_active => Err(inactive()),
            Self::SuperAdmin(_) => Ok(()),
        }
    }
}

/// Resolves an id carried by a token into a principal.
pub trait IdentityLookup {
    async fn lookup(&self, id: i32) -> Result<Option<Principal>, AppError>;
}

impl<C: ConnectionTrait> IdentityLookup for UserRepository<'_, C> {
    async fn lookup(&self, id: i32) -> Result<Option<Principal>, AppError> {
        Ok(self.find_by_id(id).await?.map(Principal::User))
    }
}

impl<C: ConnectionTrait> IdentityLookup for AdminRepository<'_, C> {
    async fn lookup(&self, id: i32) -> Result<Option<Principal>, AppError> {
        Ok(self.find_by_id(id).await?.map(Principal::Admin))
    }
}

impl<C: ConnectionTrait> IdentityLookup for SuperAdminRepository<'_, C> {
    async fn lookup(&self, id: i32) -> Result<Option<Principal>, AppError> {
        Ok(self.find_by_id(id).await?.map(Principal::SuperAdmin))
    }
}

async fn resolve<L: IdentityLookup>(
    lookup: &L,
    role: Role,
    id: i32,
) -> Result<Principal, AppError> {
    lookup
        .lookup(id)
        .await?
        .ok_or_else(|| AuthError::PrincipalNotFound { role, id }.into())
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService) -> Self {
        Self { db, tokens }
    }

    /// Authenticates the token and checks every action.
    ///
    /// # Arguments
    /// - `token` - Token taken from the request, if any
    /// - `actions` - Actions the endpoint performs; all must be permitted
    ///
    /// # Returns
    /// - `Ok(Principal)` - The caller
    /// - `Err(AuthError::MissingToken)` - No token was sent
    /// - `Err(AuthError::InvalidToken)` - Bad signature, malformed or expired
    /// - `Err(AuthError::PrincipalNotFound)` - Account no longer exists
    /// - `Err(AuthError::AccountInactive)` - Account is deactivated
    /// - `Err(AuthError::AdminNotVerified)` - Admin awaiting verification
    /// - `Err(AuthError::AccessDenied)` - Role may not perform an action
    pub async fn require(
        &self,
        token: Option<&str>,
        actions: &[Action],
    ) -> Result<Principal, AppError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        let claims = self.tokens.verify(token)?;

        let principal = match claims.role {
            Role::User => resolve(&UserRepository::new(self.db), claims.role, claims.id).await?,
            Role::Admin => resolve(&AdminRepository::new(self.db), claims.role, claims.id).await?,
            Role::SuperAdmin => {
                resolve(&SuperAdminRepository::new(self.db), claims.role, claims.id).await?
            }
        };
        principal.ensure_usable()?;

        if let Some(action) = actions.iter().find(|a| !permits(claims.role, **a)) {
            return Err(AuthError::AccessDenied {
                role: claims.role,
                id: claims.id,
                action: format!("{:?}", action),
            }
            .into());
        }

        Ok(principal)
    }

    /// Like [`require`](Self::require) but the caller must be a reader.
    pub async fn require_reader(
        &self,
        token: Option<&str>,
        actions: &[Action],
    ) -> Result<User, AppError> {
        Ok(self.require(token, actions).await?.into_user()?)
    }
}
