use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    AdminConsoleClient, Notification, NotificationKind, NotificationSink, PageHandle,
};
use shared::{
    domain::{
        AccountId, ApiKeyId, ApplicationId, CharacterId, CsrfToken, GroupId, RoleId, UserId,
    },
    protocol::AdminCommand,
};

mod config;

#[derive(Parser, Debug)]
#[command(name = "console", about = "Terminal front end for the auth admin backend")]
struct Cli {
    /// Overrides the configured server URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Update the account email address and password.
    SettingsEdit {
        #[arg(long)]
        old_password: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        new_password_confirmation: String,
    },
    /// Associate an API key with the account.
    ApiKeyAdd {
        api_key_id: i64,
        verification_code: String,
    },
    ApiKeyDelete {
        api_key_id: i64,
    },
    /// Mark a character as the account default.
    CharacterSetDefault {
        character_id: i64,
    },
    ApplicationDelete {
        application_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
    ApplicationEdit {
        application_id: i64,
        name: String,
        callback: String,
    },
    ApplicationResetSecret {
        application_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
    UserGroupDelete {
        user_id: i64,
        group_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
    UserRoleDelete {
        user_id: i64,
        role_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
    UserRoleToggleGranted {
        user_id: i64,
        role_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
    UserAccountDelete {
        user_id: i64,
        account_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
    UserDelete {
        user_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
    GroupRoleDelete {
        group_id: i64,
        role_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
    GroupRoleToggleGranted {
        group_id: i64,
        role_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
    GroupDelete {
        group_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
    RoleDelete {
        role_id: i64,
        #[arg(long)]
        csrf_token: String,
    },
}

impl Command {
    fn into_admin_command(self) -> AdminCommand {
        match self {
            Self::SettingsEdit {
                old_password,
                email,
                new_password,
                new_password_confirmation,
            } => AdminCommand::SettingsEdit {
                old_password,
                email,
                new_password,
                new_password_confirmation,
            },
            Self::ApiKeyAdd {
                api_key_id,
                verification_code,
            } => AdminCommand::ApiKeyAdd {
                api_key_id: ApiKeyId(api_key_id),
                verification_code,
            },
            Self::ApiKeyDelete { api_key_id } => AdminCommand::ApiKeyDelete {
                api_key_id: ApiKeyId(api_key_id),
            },
            Self::CharacterSetDefault { character_id } => AdminCommand::CharacterSetDefault {
                character_id: CharacterId(character_id),
            },
            Self::ApplicationDelete {
                application_id,
                csrf_token,
            } => AdminCommand::ApplicationDelete {
                application_id: ApplicationId(application_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
            Self::ApplicationEdit {
                application_id,
                name,
                callback,
            } => AdminCommand::ApplicationEdit {
                application_id: ApplicationId(application_id),
                name,
                callback,
            },
            Self::ApplicationResetSecret {
                application_id,
                csrf_token,
            } => AdminCommand::ApplicationResetSecret {
                application_id: ApplicationId(application_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
            Self::UserGroupDelete {
                user_id,
                group_id,
                csrf_token,
            } => AdminCommand::UserGroupDelete {
                user_id: UserId(user_id),
                group_id: GroupId(group_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
            Self::UserRoleDelete {
                user_id,
                role_id,
                csrf_token,
            } => AdminCommand::UserRoleDelete {
                user_id: UserId(user_id),
                role_id: RoleId(role_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
            Self::UserRoleToggleGranted {
                user_id,
                role_id,
                csrf_token,
            } => AdminCommand::UserRoleToggleGranted {
                user_id: UserId(user_id),
                role_id: RoleId(role_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
            Self::UserAccountDelete {
                user_id,
                account_id,
                csrf_token,
            } => AdminCommand::UserAccountDelete {
                user_id: UserId(user_id),
                account_id: AccountId(account_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
            Self::UserDelete {
                user_id,
                csrf_token,
            } => AdminCommand::UserDelete {
                user_id: UserId(user_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
            Self::GroupRoleDelete {
                group_id,
                role_id,
                csrf_token,
            } => AdminCommand::GroupRoleDelete {
                group_id: GroupId(group_id),
                role_id: RoleId(role_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
            Self::GroupRoleToggleGranted {
                group_id,
                role_id,
                csrf_token,
            } => AdminCommand::GroupRoleToggleGranted {
                group_id: GroupId(group_id),
                role_id: RoleId(role_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
            Self::GroupDelete {
                group_id,
                csrf_token,
            } => AdminCommand::GroupDelete {
                group_id: GroupId(group_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
            Self::RoleDelete {
                role_id,
                csrf_token,
            } => AdminCommand::RoleDelete {
                role_id: RoleId(role_id),
                csrf_token: CsrfToken::new(csrf_token),
            },
        }
    }
}

/// Renders notifications to the terminal; errors land on stderr so they
/// survive piping stdout.
struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn append(&self, notification: Notification) {
        let line = format!(
            "{} {}",
            notification.kind.heading(),
            notification.message
        );
        match notification.kind {
            NotificationKind::Error => eprintln!("{line}"),
            NotificationKind::Success | NotificationKind::Info => println!("{line}"),
        }
    }
}

struct TerminalPage;

impl PageHandle for TerminalPage {
    fn reload(&self) {
        println!("Command accepted; reload the page to see the change.");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }

    let client = AdminConsoleClient::new(
        &settings.server_url,
        Arc::new(TerminalSink),
        Arc::new(TerminalPage),
    )?;
    client.submit(&cli.command.into_admin_command()).await;

    Ok(())
}
