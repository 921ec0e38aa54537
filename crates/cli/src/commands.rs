//! Subcommand handlers. Every mutation goes through the admin screens.

use anyhow::{Context, anyhow};

use warden_auth::grouping::group_label;
use warden_auth::{
    FormMode, Permission, PermissionDraft, PermissionSelection, RoleDraft, UserDraft,
    explain_authorization, group_permissions,
};
use warden_client::{
    ApiClient, Dashboard, PermissionsScreen, RolesScreen, Session, SessionStore, UsersScreen,
};
use warden_core::{PermissionId, RoleId, UserId};

use crate::cli::{Command, PermissionsCommand, RolesCommand, SelectionArgs, UsersCommand};

pub async fn run<S: SessionStore>(
    command: Command,
    session: &mut Session<S>,
    api: &ApiClient,
) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let principal = session.login(api, &email, &password).await?;
            println!("Logged in as {}", principal.greeting_name());
        }
        Command::GoogleLogin { id_token } => {
            let principal = session.google_login(api, &id_token).await?;
            println!("Logged in as {}", principal.greeting_name());
        }
        Command::Logout => {
            session.logout()?;
            println!("Logged out");
        }
        Command::Whoami => print_dashboard(&Dashboard::for_session(session)?),
        Command::Check { permission } => {
            let explanation = explain_authorization(session.principal(), &Permission::new(permission));
            let verdict = if explanation.granted { "granted" } else { "denied" };
            println!("{}: {verdict} ({})", explanation.required_permission, explanation.reason);
        }
        Command::Users(cmd) => users(cmd, session, api).await?,
        Command::Roles(cmd) => roles(cmd, session, api).await?,
        Command::Permissions(cmd) => permissions(cmd, session, api).await?,
    }
    Ok(())
}

fn print_dashboard(dash: &Dashboard) {
    println!("Welcome, {}", dash.greeting);
    if let Some(role) = &dash.role {
        println!("Role: {role}");
    }

    let nav: Vec<_> = dash.navigation.iter().map(|n| n.label).collect();
    println!("Navigation: {}", nav.join(" | "));

    for link in &dash.links {
        println!("  {} ({}): {}", link.title, link.href, link.description);
    }
    println!("Permissions: {}", dash.permissions.join(", "));
}

/// Apply checkbox-style flags on top of `selection`.
fn select(
    selection: PermissionSelection,
    args: &SelectionArgs,
    catalog: &[String],
) -> anyhow::Result<PermissionSelection> {
    let groups = group_permissions(catalog);
    let mut next = if args.all {
        selection.toggle_all(catalog, true)
    } else {
        selection
    };

    for key in &args.grant_groups {
        let group = groups
            .get(key)
            .ok_or_else(|| anyhow!("unknown permission group `{key}`"))?;
        next = next.toggle_group(group, true);
    }
    for permission in &args.grant {
        next = next.toggle(permission, true);
    }
    Ok(next)
}

async fn users<S: SessionStore>(
    cmd: UsersCommand,
    session: &Session<S>,
    api: &ApiClient,
) -> anyhow::Result<()> {
    let mut screen = UsersScreen::open(session, api).await?;

    match cmd {
        UsersCommand::List => {
            for user in screen.users() {
                println!(
                    "{}\t{}\t{}\t{}",
                    user.id,
                    user.email,
                    user.display_name(),
                    user.primary_role().unwrap_or("-")
                );
            }
        }
        UsersCommand::Add { email, name, password, role } => {
            let draft = UserDraft {
                mode: FormMode::Create,
                email,
                name,
                password,
                role,
            };
            screen.save(&draft, None).await?;
            println!("User created ({} total)", screen.users().len());
        }
        UsersCommand::Edit { id, email, name, password, role } => {
            let id = UserId::new(id);
            let mut draft = screen.edit_draft(&id).with_context(|| format!("user {id}"))?;
            if let Some(email) = email {
                draft.email = email;
            }
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(password) = password {
                draft.password = password;
            }
            if let Some(role) = role {
                draft.role = role;
            }
            screen.save(&draft, Some(&id)).await?;
            println!("User {id} updated");
        }
        UsersCommand::Delete { id } => {
            let id = UserId::new(id);
            screen.delete(&id).await?;
            println!("User {id} deleted");
        }
        UsersCommand::AddRole { name, selection } => {
            let draft = RoleDraft {
                name,
                description: String::new(),
                selection: select(PermissionSelection::new(), &selection, screen.catalog())?,
            };
            let role = screen.create_inline_role(&draft).await?;
            println!("Role {} created: {}", role.name, role.permissions.join(", "));
        }
    }
    Ok(())
}

async fn roles<S: SessionStore>(
    cmd: RolesCommand,
    session: &Session<S>,
    api: &ApiClient,
) -> anyhow::Result<()> {
    let mut screen = RolesScreen::open(session, api).await?;

    match cmd {
        RolesCommand::List => {
            for role in screen.roles() {
                println!("{}\t{}\t{} permission(s)", role.id, role.name, role.permissions.len());
            }
        }
        RolesCommand::Show { id } => {
            let role = screen
                .role(RoleId::new(id))
                .ok_or_else(|| anyhow!("role {id} not found"))?;
            println!("{} (#{})", role.name, role.id);
            if let Some(description) = role.description.as_deref().filter(|d| !d.is_empty()) {
                println!("{description}");
            }
            if role.grants_everything() {
                println!("Grants every permission");
            } else {
                for (key, names) in group_permissions(&role.permissions) {
                    println!("  {}: {}", group_label(&key), names.join(", "));
                }
            }
        }
        RolesCommand::Add { name, description, selection } => {
            let draft = RoleDraft {
                name,
                description: description.unwrap_or_default(),
                selection: select(PermissionSelection::new(), &selection, screen.catalog())?,
            };
            screen.save(&draft, None).await?;
            println!("Role created ({} total)", screen.roles().len());
        }
        RolesCommand::Edit {
            id,
            name,
            description,
            selection,
            revoke,
            revoke_groups,
        } => {
            let id = RoleId::new(id);
            let mut draft = screen.edit_draft(id).with_context(|| format!("role {id}"))?;
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(description) = description {
                draft.description = description;
            }

            let groups = screen.permission_groups();
            let mut next = select(draft.selection, &selection, screen.catalog())?;
            for key in &revoke_groups {
                let group = groups
                    .get(key)
                    .ok_or_else(|| anyhow!("unknown permission group `{key}`"))?;
                next = next.toggle_group(group, false);
            }
            for permission in &revoke {
                next = next.toggle(permission, false);
            }
            draft.selection = next;

            screen.save(&draft, Some(id)).await?;
            println!("Role {id} updated");
        }
        RolesCommand::Delete { id } => {
            let id = RoleId::new(id);
            screen.delete(id).await?;
            println!("Role {id} deleted");
        }
    }
    Ok(())
}

async fn permissions<S: SessionStore>(
    cmd: PermissionsCommand,
    session: &Session<S>,
    api: &ApiClient,
) -> anyhow::Result<()> {
    let mut screen = PermissionsScreen::open(session, api).await?;

    match cmd {
        PermissionsCommand::List => {
            for record in screen.permissions() {
                println!(
                    "{}\t{}\t{}",
                    record.id,
                    record.name,
                    record.description.as_deref().unwrap_or("")
                );
            }
        }
        PermissionsCommand::Groups => {
            for (key, names) in screen.permission_groups() {
                println!("{}: {}", group_label(&key), names.join(", "));
            }
        }
        PermissionsCommand::Add { name, description } => {
            let draft = PermissionDraft {
                name,
                description: description.unwrap_or_default(),
            };
            screen.save(&draft, None).await?;
            println!("Permission created ({} total)", screen.permissions().len());
        }
        PermissionsCommand::Edit { id, name, description } => {
            let id = PermissionId::new(id);
            let mut draft = screen.edit_draft(id).with_context(|| format!("permission {id}"))?;
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            screen.save(&draft, Some(id)).await?;
            println!("Permission {id} updated");
        }
        PermissionsCommand::Delete { id } => {
            let id = PermissionId::new(id);
            screen.delete(id).await?;
            println!("Permission {id} deleted");
        }
    }
    Ok(())
}
