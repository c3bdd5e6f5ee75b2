use uuid::Uuid;

use vitrine_domain::id::{AddressId, UserId, VerificationId};

use crate::domain::repository::{NewUser, UserRepository};
use crate::domain::types::{Address, User, UserVerification, validate_username};
use crate::error::AccountsServiceError;

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub username: String,
    /// Already hashed by the caller; this service never sees a plain password.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
}

pub struct RegisterUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<UserId, AccountsServiceError> {
        if !validate_username(&input.username) {
            return Err(AccountsServiceError::InvalidUsername);
        }
        self.repo
            .create(&NewUser {
                username: input.username,
                password: input.password,
                first_name: input.first_name,
                last_name: input.last_name,
                roles: input.roles,
            })
            .await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<User, AccountsServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsServiceError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: UserId,
        input: UpdateProfileInput,
    ) -> Result<(), AccountsServiceError> {
        if input.first_name.is_none() && input.last_name.is_none() {
            return Err(AccountsServiceError::MissingData);
        }
        self.repo
            .update_profile(
                user_id,
                input.first_name.as_deref(),
                input.last_name.as_deref(),
            )
            .await
    }
}

// ── SetRoles ─────────────────────────────────────────────────────────────────

pub struct SetRolesUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SetRolesUseCase<R> {
    /// Stores the roles verbatim; the baseline role is computed at read time.
    pub async fn execute(
        &self,
        user_id: UserId,
        roles: Vec<String>,
    ) -> Result<(), AccountsServiceError> {
        self.repo.set_roles(user_id, &roles).await
    }
}

// ── SetBan ───────────────────────────────────────────────────────────────────

pub struct SetBanUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SetBanUseCase<R> {
    /// `None` resets the flag to its unset state.
    pub async fn execute(
        &self,
        user_id: UserId,
        is_banned: Option<bool>,
    ) -> Result<(), AccountsServiceError> {
        self.repo.set_banned(user_id, is_banned).await
    }
}

// ── ReplaceAddress / ClearAddress ────────────────────────────────────────────

pub struct ReplaceAddressInput {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

pub struct ReplaceAddressUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ReplaceAddressUseCase<R> {
    pub async fn execute(
        &self,
        user_id: UserId,
        input: ReplaceAddressInput,
    ) -> Result<AddressId, AccountsServiceError> {
        self.repo
            .replace_address(
                user_id,
                &Address {
                    id: None,
                    street: input.street,
                    city: input.city,
                    postal_code: input.postal_code,
                    country: input.country,
                },
            )
            .await
    }
}

pub struct ClearAddressUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ClearAddressUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<(), AccountsServiceError> {
        self.repo.clear_address(user_id).await
    }
}

// ── IssueVerification / ClearVerification ────────────────────────────────────

pub struct IssueVerificationUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> IssueVerificationUseCase<R> {
    /// Issue a fresh verification code, replacing any pending one.
    pub async fn execute(
        &self,
        user_id: UserId,
    ) -> Result<(VerificationId, String), AccountsServiceError> {
        let code = Uuid::new_v4().to_string();
        let id = self
            .repo
            .replace_verification(
                user_id,
                &UserVerification {
                    id: None,
                    code: code.clone(),
                    verified: false,
                },
            )
            .await?;
        Ok((id, code))
    }
}

pub struct ClearVerificationUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ClearVerificationUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<(), AccountsServiceError> {
        self.repo.clear_verification(user_id).await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<(), AccountsServiceError> {
        if !self.repo.delete(user_id).await? {
            return Err(AccountsServiceError::UserNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockUserRepo {
        user: Option<User>,
        delete_succeeds: bool,
    }

    impl UserRepository for MockUserRepo {
        async fn create(&self, _user: &NewUser) -> Result<UserId, AccountsServiceError> {
            Ok(UserId(1))
        }
        async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, AccountsServiceError> {
            Ok(self.user.clone())
        }
        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<User>, AccountsServiceError> {
            Ok(self.user.clone())
        }
        async fn update_profile(
            &self,
            _id: UserId,
            _first_name: Option<&str>,
            _last_name: Option<&str>,
        ) -> Result<(), AccountsServiceError> {
            Ok(())
        }
        async fn set_roles(
            &self,
            _id: UserId,
            _roles: &[String],
        ) -> Result<(), AccountsServiceError> {
            Ok(())
        }
        async fn set_password(
            &self,
            _id: UserId,
            _password: &str,
        ) -> Result<(), AccountsServiceError> {
            Ok(())
        }
        async fn set_banned(
            &self,
            _id: UserId,
            _is_banned: Option<bool>,
        ) -> Result<(), AccountsServiceError> {
            Ok(())
        }
        async fn replace_address(
            &self,
            _id: UserId,
            _address: &Address,
        ) -> Result<AddressId, AccountsServiceError> {
            Ok(AddressId(1))
        }
        async fn clear_address(&self, _id: UserId) -> Result<(), AccountsServiceError> {
            Ok(())
        }
        async fn replace_verification(
            &self,
            _id: UserId,
            _verification: &UserVerification,
        ) -> Result<VerificationId, AccountsServiceError> {
            Ok(VerificationId(1))
        }
        async fn clear_verification(&self, _id: UserId) -> Result<(), AccountsServiceError> {
            Ok(())
        }
        async fn delete(&self, _id: UserId) -> Result<bool, AccountsServiceError> {
            Ok(self.delete_succeeds)
        }
    }

    fn register_input(username: &str) -> RegisterUserInput {
        RegisterUserInput {
            username: username.to_owned(),
            password: "$argon2id$...".to_owned(),
            first_name: "Alice".to_owned(),
            last_name: "Martin".to_owned(),
            roles: vec![],
        }
    }

    #[tokio::test]
    async fn should_register_user_with_valid_username() {
        let usecase = RegisterUserUseCase {
            repo: MockUserRepo::default(),
        };
        let result = usecase.execute(register_input("alice")).await;
        assert!(matches!(result, Ok(UserId(1))));
    }

    #[tokio::test]
    async fn should_reject_empty_username() {
        let usecase = RegisterUserUseCase {
            repo: MockUserRepo::default(),
        };
        let result = usecase.execute(register_input("")).await;
        assert!(matches!(result, Err(AccountsServiceError::InvalidUsername)));
    }

    #[tokio::test]
    async fn should_reject_username_over_180_chars() {
        let usecase = RegisterUserUseCase {
            repo: MockUserRepo::default(),
        };
        let result = usecase.execute(register_input(&"a".repeat(181))).await;
        assert!(matches!(result, Err(AccountsServiceError::InvalidUsername)));
    }

    #[tokio::test]
    async fn should_return_user_not_found() {
        let usecase = GetUserUseCase {
            repo: MockUserRepo::default(),
        };
        let result = usecase.execute(UserId(1)).await;
        assert!(matches!(result, Err(AccountsServiceError::UserNotFound)));
    }

    #[tokio::test]
    async fn should_return_missing_data_when_profile_update_is_empty() {
        let usecase = UpdateProfileUseCase {
            repo: MockUserRepo::default(),
        };
        let result = usecase
            .execute(
                UserId(1),
                UpdateProfileInput {
                    first_name: None,
                    last_name: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AccountsServiceError::MissingData)));
    }

    #[tokio::test]
    async fn should_issue_a_verification_code() {
        let usecase = IssueVerificationUseCase {
            repo: MockUserRepo::default(),
        };
        let (id, code) = usecase.execute(UserId(1)).await.unwrap();
        assert_eq!(id, VerificationId(1));
        assert!(!code.is_empty());
    }

    #[tokio::test]
    async fn should_map_failed_delete_to_user_not_found() {
        let usecase = DeleteUserUseCase {
            repo: MockUserRepo {
                delete_succeeds: false,
                ..Default::default()
            },
        };
        let result = usecase.execute(UserId(1)).await;
        assert!(matches!(result, Err(AccountsServiceError::UserNotFound)));
    }

    #[tokio::test]
    async fn should_delete_existing_user() {
        let usecase = DeleteUserUseCase {
            repo: MockUserRepo {
                delete_succeeds: true,
                ..Default::default()
            },
        };
        assert!(usecase.execute(UserId(1)).await.is_ok());
    }
}
