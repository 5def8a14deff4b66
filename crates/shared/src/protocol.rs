use serde_json::Value;

use crate::domain::{
    AccountId, ApiKeyId, ApplicationId, CharacterId, CsrfToken, GroupId, RoleId, UserId,
};

/// One backend operation reachable over `PUT`, together with everything the
/// wire format needs: the command name the backend's dispatch switch matches,
/// the endpoint path, and the URL-encoded form fields.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    SettingsEdit {
        old_password: String,
        email: String,
        new_password: String,
        new_password_confirmation: String,
    },
    ApiKeyAdd {
        api_key_id: ApiKeyId,
        verification_code: String,
    },
    ApiKeyDelete {
        api_key_id: ApiKeyId,
    },
    CharacterSetDefault {
        character_id: CharacterId,
    },
    ApplicationDelete {
        application_id: ApplicationId,
        csrf_token: CsrfToken,
    },
    ApplicationEdit {
        application_id: ApplicationId,
        name: String,
        callback: String,
    },
    ApplicationResetSecret {
        application_id: ApplicationId,
        csrf_token: CsrfToken,
    },
    UserGroupDelete {
        user_id: UserId,
        group_id: GroupId,
        csrf_token: CsrfToken,
    },
    UserRoleDelete {
        user_id: UserId,
        role_id: RoleId,
        csrf_token: CsrfToken,
    },
    UserRoleToggleGranted {
        user_id: UserId,
        role_id: RoleId,
        csrf_token: CsrfToken,
    },
    UserAccountDelete {
        user_id: UserId,
        account_id: AccountId,
        csrf_token: CsrfToken,
    },
    UserDelete {
        user_id: UserId,
        csrf_token: CsrfToken,
    },
    GroupRoleDelete {
        group_id: GroupId,
        role_id: RoleId,
        csrf_token: CsrfToken,
    },
    GroupRoleToggleGranted {
        group_id: GroupId,
        role_id: RoleId,
        csrf_token: CsrfToken,
    },
    GroupDelete {
        group_id: GroupId,
        csrf_token: CsrfToken,
    },
    RoleDelete {
        role_id: RoleId,
        csrf_token: CsrfToken,
    },
}

impl AdminCommand {
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::SettingsEdit { .. } => "settingsEdit",
            Self::ApiKeyAdd { .. } => "apiKeyAdd",
            Self::ApiKeyDelete { .. } => "apiKeyDelete",
            Self::CharacterSetDefault { .. } => "characterSetDefault",
            Self::ApplicationDelete { .. } => "settingsApplicationsDelete",
            Self::ApplicationEdit { .. } => "settingsApplicationsEditApplication",
            Self::ApplicationResetSecret { .. } => {
                "settingsApplicationsEditApplicationResetSecret"
            }
            Self::UserGroupDelete { .. } => "adminUserDetailsGroupDelete",
            Self::UserRoleDelete { .. } => "adminUserDetailsRoleDelete",
            Self::UserRoleToggleGranted { .. } => "adminUserDetailsRoleToggleGranted",
            Self::UserAccountDelete { .. } => "adminUserDetailsAccountDelete",
            Self::UserDelete { .. } => "adminUsersDelete",
            Self::GroupRoleDelete { .. } => "adminGroupDetailsRoleDelete",
            Self::GroupRoleToggleGranted { .. } => "adminGroupDetailsRoleToggleGranted",
            Self::GroupDelete { .. } => "adminGroupsDelete",
            Self::RoleDelete { .. } => "adminRolesDelete",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::SettingsEdit { .. } => "/settings",
            Self::ApiKeyAdd { .. } | Self::ApiKeyDelete { .. } => "/settings/accounts",
            Self::CharacterSetDefault { .. } => "/settings/characters",
            Self::ApplicationDelete { .. }
            | Self::ApplicationEdit { .. }
            | Self::ApplicationResetSecret { .. } => "/settings/applications",
            Self::UserGroupDelete { .. }
            | Self::UserRoleDelete { .. }
            | Self::UserRoleToggleGranted { .. }
            | Self::UserAccountDelete { .. }
            | Self::UserDelete { .. } => "/admin/users",
            Self::GroupRoleDelete { .. }
            | Self::GroupRoleToggleGranted { .. }
            | Self::GroupDelete { .. } => "/admin/groups",
            Self::RoleDelete { .. } => "/admin/roles",
        }
    }

    /// Form fields in wire order, `command` first. Field names match what the
    /// backend reads via its form parser.
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("command", self.wire_name().to_string())];
        match self {
            Self::SettingsEdit {
                old_password,
                email,
                new_password,
                new_password_confirmation,
            } => {
                pairs.push(("settingsEditOldPassword", old_password.clone()));
                pairs.push(("settingsEditEmail", email.clone()));
                pairs.push(("settingsEditNewPassword", new_password.clone()));
                pairs.push((
                    "settingsEditNewPasswordConfirmation",
                    new_password_confirmation.clone(),
                ));
            }
            Self::ApiKeyAdd {
                api_key_id,
                verification_code,
            } => {
                pairs.push(("apiKeyID", api_key_id.to_string()));
                pairs.push(("apivCode", verification_code.clone()));
            }
            Self::ApiKeyDelete { api_key_id } => {
                pairs.push(("apiKeyID", api_key_id.to_string()));
            }
            Self::CharacterSetDefault { character_id } => {
                pairs.push(("characterID", character_id.to_string()));
            }
            Self::ApplicationDelete {
                application_id,
                csrf_token,
            } => {
                pairs.push(("applicationID", application_id.to_string()));
                pairs.push(("csrfToken", csrf_token.as_str().to_string()));
            }
            Self::ApplicationEdit {
                application_id,
                name,
                callback,
            } => {
                pairs.push(("applicationID", application_id.to_string()));
                pairs.push(("settingsApplicationsEditApplicationName", name.clone()));
                pairs.push((
                    "settingsApplicationsEditApplicationCallback",
                    callback.clone(),
                ));
            }
            Self::ApplicationResetSecret {
                application_id,
                csrf_token,
            } => {
                pairs.push(("applicationID", application_id.to_string()));
                pairs.push(("csrfToken", csrf_token.as_str().to_string()));
            }
            Self::UserGroupDelete {
                user_id,
                group_id,
                csrf_token,
            } => {
                pairs.push(("userID", user_id.to_string()));
                pairs.push(("groupID", group_id.to_string()));
                pairs.push(("csrfToken", csrf_token.as_str().to_string()));
            }
            Self::UserRoleDelete {
                user_id,
                role_id,
                csrf_token,
            }
            | Self::UserRoleToggleGranted {
                user_id,
                role_id,
                csrf_token,
            } => {
                pairs.push(("userID", user_id.to_string()));
                pairs.push(("roleID", role_id.to_string()));
                pairs.push(("csrfToken", csrf_token.as_str().to_string()));
            }
            Self::UserAccountDelete {
                user_id,
                account_id,
                csrf_token,
            } => {
                pairs.push(("userID", user_id.to_string()));
                pairs.push(("accountID", account_id.to_string()));
                pairs.push(("csrfToken", csrf_token.as_str().to_string()));
            }
            Self::UserDelete {
                user_id,
                csrf_token,
            } => {
                pairs.push(("userID", user_id.to_string()));
                pairs.push(("csrfToken", csrf_token.as_str().to_string()));
            }
            Self::GroupRoleDelete {
                group_id,
                role_id,
                csrf_token,
            }
            | Self::GroupRoleToggleGranted {
                group_id,
                role_id,
                csrf_token,
            } => {
                pairs.push(("groupID", group_id.to_string()));
                pairs.push(("roleID", role_id.to_string()));
                pairs.push(("csrfToken", csrf_token.as_str().to_string()));
            }
            Self::GroupDelete {
                group_id,
                csrf_token,
            } => {
                pairs.push(("groupID", group_id.to_string()));
                pairs.push(("csrfToken", csrf_token.as_str().to_string()));
            }
            Self::RoleDelete {
                role_id,
                csrf_token,
            } => {
                pairs.push(("roleID", role_id.to_string()));
                pairs.push(("csrfToken", csrf_token.as_str().to_string()));
            }
        }
        pairs
    }
}

/// Outcome envelope returned by every backend command handler.
///
/// Decoded explicitly from the raw JSON value so that no response shape can
/// fail the decode: anything outside the four known status codes lands in
/// `Unrecognized` with the payload preserved for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    Reload,
    Error { result: Option<String> },
    Success { result: Option<String> },
    Info { result: Option<String> },
    Unrecognized { raw: Value },
}

impl ResponseEnvelope {
    pub fn from_value(raw: Value) -> Self {
        // The backend occasionally marshals a non-string into `result`;
        // anything that is not a string counts as absent.
        let result = raw
            .get("result")
            .and_then(Value::as_str)
            .map(str::to_owned);

        match raw.get("status").and_then(Value::as_i64) {
            Some(0) => Self::Reload,
            Some(1) => Self::Error { result },
            Some(2) => Self::Success { result },
            Some(3) => Self::Info { result },
            _ => Self::Unrecognized { raw },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_all_known_status_codes() {
        assert_eq!(
            ResponseEnvelope::from_value(json!({"status": 0, "result": null})),
            ResponseEnvelope::Reload
        );
        assert_eq!(
            ResponseEnvelope::from_value(json!({"status": 1, "result": "nope"})),
            ResponseEnvelope::Error {
                result: Some("nope".to_string())
            }
        );
        assert_eq!(
            ResponseEnvelope::from_value(json!({"status": 2})),
            ResponseEnvelope::Success { result: None }
        );
        assert_eq!(
            ResponseEnvelope::from_value(json!({"status": 3, "result": "fyi"})),
            ResponseEnvelope::Info {
                result: Some("fyi".to_string())
            }
        );
    }

    #[test]
    fn unknown_status_preserves_raw_payload() {
        let raw = json!({"status": 7, "result": "??"});
        assert_eq!(
            ResponseEnvelope::from_value(raw.clone()),
            ResponseEnvelope::Unrecognized { raw }
        );
    }

    #[test]
    fn decode_is_total_over_arbitrary_shapes() {
        for raw in [
            json!(null),
            json!(true),
            json!("plain string"),
            json!([1, 2, 3]),
            json!({}),
            json!({"status": "2"}),
            json!({"status": 2.5}),
        ] {
            assert!(matches!(
                ResponseEnvelope::from_value(raw),
                ResponseEnvelope::Unrecognized { .. }
            ));
        }
    }

    #[test]
    fn non_string_result_counts_as_absent() {
        assert_eq!(
            ResponseEnvelope::from_value(json!({"status": 1, "result": {}})),
            ResponseEnvelope::Error { result: None }
        );
    }

    #[test]
    fn form_pairs_lead_with_command_name() {
        let command = AdminCommand::UserDelete {
            user_id: UserId(42),
            csrf_token: CsrfToken::new("tok"),
        };
        assert_eq!(command.endpoint(), "/admin/users");
        assert_eq!(
            command.form_pairs(),
            vec![
                ("command", "adminUsersDelete".to_string()),
                ("userID", "42".to_string()),
                ("csrfToken", "tok".to_string()),
            ]
        );
    }

    #[test]
    fn application_commands_share_the_applications_endpoint() {
        let delete = AdminCommand::ApplicationDelete {
            application_id: ApplicationId(7),
            csrf_token: CsrfToken::new("tok"),
        };
        let edit = AdminCommand::ApplicationEdit {
            application_id: ApplicationId(7),
            name: "app".to_string(),
            callback: "https://example.com/callback".to_string(),
        };
        assert_eq!(delete.endpoint(), edit.endpoint());
        assert_eq!(edit.wire_name(), "settingsApplicationsEditApplication");
    }
}
