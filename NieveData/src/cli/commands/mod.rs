pub mod convert;

use clap::Subcommand;

use crate::config::ConvertConfig;
use crate::converter::Stage;

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run every conversion (default)
    All,
    /// inicio.xml + menu.xml → inicio.json
    Inicio,
    /// pageUTF8.xml → content.json
    Content,
    /// hotelesUTF8.xml → hoteles.json
    Hoteles,
}

impl Commands {
    /// Stages this command runs, in order.
    pub fn stages(self) -> &'static [Stage] {
        match self {
            Commands::All => &Stage::ALL,
            Commands::Inicio => &[Stage::Inicio],
            Commands::Content => &[Stage::Content],
            Commands::Hoteles => &[Stage::Hoteles],
        }
    }

    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if any stage fails.
    pub fn execute(self, config: &ConvertConfig, quiet: bool) -> anyhow::Result<()> {
        convert::execute(config, self.stages(), quiet)
    }
}
