//! Contracts for user registration, login and profile update

use ct_core::error::ValidationErrors;
use ct_models::{
    Credentials, LoginParams, NewUser, RegisterParams, UpdateUserParams, UserChanges,
};

use crate::base::{check_fields, required, Contract};

#[derive(Debug, Default, Clone, Copy)]
pub struct RegisterContract;

impl Contract<RegisterParams> for RegisterContract {
    type Output = NewUser;

    fn validate(&self, input: RegisterParams) -> Result<NewUser, ValidationErrors> {
        check_fields(&input, RegisterParams::FIELDS)?;

        Ok(NewUser {
            username: input.username.ok_or_else(|| required("username"))?,
            password: input.password.ok_or_else(|| required("password"))?,
            name: input.name.ok_or_else(|| required("name"))?,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoginContract;

impl Contract<LoginParams> for LoginContract {
    type Output = Credentials;

    fn validate(&self, input: LoginParams) -> Result<Credentials, ValidationErrors> {
        check_fields(&input, LoginParams::FIELDS)?;

        Ok(Credentials {
            username: input.username.ok_or_else(|| required("username"))?,
            password: input.password.ok_or_else(|| required("password"))?,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UpdateUserContract;

impl Contract<UpdateUserParams> for UpdateUserContract {
    type Output = UserChanges;

    fn validate(&self, input: UpdateUserParams) -> Result<UserChanges, ValidationErrors> {
        check_fields(&input, UpdateUserParams::FIELDS)?;

        Ok(UserChanges {
            name: input.name,
            password: input.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_requires_all_fields() {
        let errors = RegisterContract
            .validate(RegisterParams::default())
            .unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["username", "password", "name"]);
    }

    #[test]
    fn test_login() {
        let credentials = LoginContract
            .validate(LoginParams {
                username: Some("test".into()),
                password: Some("rahasia".into()),
            })
            .unwrap();
        assert_eq!(credentials.username, "test");
    }

    #[test]
    fn test_update_allows_empty_body() {
        let changes = UpdateUserContract
            .validate(UpdateUserParams::default())
            .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_update_rejects_empty_name() {
        let errors = UpdateUserContract
            .validate(UpdateUserParams {
                name: Some(String::new()),
                password: None,
            })
            .unwrap_err();
        assert!(errors.has_error("name"));
    }
}
