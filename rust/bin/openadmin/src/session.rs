use std::io::Write;

use access::AccessService;
use openadmin_core::{ConsoleConfig, Confirmer};
use org::OrgService;

use crate::Commands;
use crate::commands;
use crate::output::Output;

/// Everything one console session owns.
pub struct Session {
    pub orgs: OrgService,
    pub access: AccessService,
}

impl Session {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            orgs: OrgService::seeded(config),
            access: AccessService::seeded(config),
        }
    }

    /// Run one command against this session.
    pub fn dispatch<W: Write>(
        &mut self,
        command: Commands,
        confirmer: &dyn Confirmer,
        out: &mut Output<W>,
    ) -> anyhow::Result<()> {
        match command {
            Commands::Org { action } => commands::org::run(&mut self.orgs, action, confirmer, out),
            Commands::Role { action } => commands::role::run(&mut self.access, action, out),
            Commands::Perm { action } => commands::perm::run(&mut self.access, action, out),
            Commands::Assign { action } => commands::assign::run(&mut self.access, action, out),
            Commands::Version => out.text(&format!("openadmin v{}", env!("CARGO_PKG_VERSION"))),
            Commands::Shell => anyhow::bail!("already in a shell"),
        }
    }
}
