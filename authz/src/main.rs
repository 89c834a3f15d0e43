//! `pt-authz` - authorization catalog diagnostics.
//!
//! Builds the catalog exactly as a service would (built-in modules minus
//! `AUTHZ_DISABLED_MODULES`, plus `AUTHZ_MODULE_DIR`) and answers queries
//! against it. Exits with status 1 when a check is denied.

use anyhow::{bail, Context, Result};
use pt_common::Role;
use tracing::info;

use pt_authz::config::AuthzConfig;
use pt_authz::observability;
use pt_authz::permissions::BaseCatalog;
use pt_authz::Authorizer;

const USAGE: &str = "Usage: pt-authz <command>

Commands:
  matrix                          Print the permission matrix as JSON
  roles                           List roles with level and permission count
  check <role> <permission>       Exit 0 if the role holds the permission
  can-manage <manager> <target>   Exit 0 if manager may administer target";

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = AuthzConfig::from_env()?;
    observability::init_tracing(config.log_format);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let modules = config
        .modules()
        .context("Failed to load extension modules")?;
    let base = BaseCatalog::standard().context("Failed to build base catalog")?;
    let authz =
        Authorizer::build(&base, &modules).context("Failed to build authorization catalog")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        modules = ?authz.modules(),
        "Authorization catalog ready"
    );

    match args.as_slice() {
        ["matrix"] => {
            let json = serde_json::to_string_pretty(&authz.matrix())
                .context("Failed to serialize matrix")?;
            println!("{json}");
        }
        ["roles"] => print_roles(&authz),
        ["check", role, permission] => {
            let granted = authz.has_permission(role, permission);
            println!("{}", if granted { "granted" } else { "denied" });
            if !granted {
                std::process::exit(1);
            }
        }
        ["can-manage", manager, target] => {
            let allowed = authz.can_manage_role(manager, target);
            println!("{}", if allowed { "allowed" } else { "denied" });
            if !allowed {
                std::process::exit(1);
            }
        }
        _ => bail!("{USAGE}"),
    }

    Ok(())
}

fn print_roles(authz: &Authorizer) {
    for entry in authz.roles().ordered() {
        let manageable: Vec<&str> = authz
            .manageable_roles(entry.role)
            .iter()
            .map(Role::as_str)
            .collect();
        println!(
            "{:<2} {:<12} {:>3} permissions  manages: [{}]",
            entry.level,
            entry.role.as_str(),
            entry.permissions().len(),
            manageable.join(", ")
        );
    }
}
