// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use clap::{Args, Parser};
use termline::{CommonResult, ConsoleConfig, ok};

use super::{try_get_default_config_file_path, ui_str};

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "tlsh")]
#[command(about = "A tiny async shell, built on the termline console engine")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version}\n\nUSAGE:\n  tlsh [\x1b[34moptions\x1b[0m]\n\n[options]\n{options}"
)]
pub struct CLIArg {
    #[arg(long, short = 'p', help = "Prompt shown in front of the line, eg: \"> \".")]
    pub prompt: Option<String>,

    #[arg(
        long,
        short = 'c',
        value_name = "file",
        help = "Read settings from this JSON file. Defaults to `tlsh/config.json` in the \
                user's config folder, if it exists."
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Do not draw the caret.")]
    pub no_caret: bool,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `tlsh.log` for debugging."
    )]
    pub enable_logging: bool,
}

impl CLIArg {
    /// Settings from the config file (explicit, or the default one), then the flags on
    /// top.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file can't be read or parsed.
    pub fn try_into_console_config(&self) -> CommonResult<ConsoleConfig> {
        let maybe_config_file = self
            .config
            .clone()
            .or_else(try_get_default_config_file_path);

        let mut config = match maybe_config_file {
            Some(path) => ConsoleConfig::try_from_json_file(path)?,
            None => ConsoleConfig::default(),
        };

        if config.welcome_message.is_none() {
            config = config.with_welcome_message(ui_str::WELCOME_MSG);
        }
        if let Some(prompt) = &self.prompt {
            config = config.with_prompt(prompt.clone());
        }
        if self.no_caret {
            config = config.with_show_caret(false);
        }

        ok!(config)
    }
}
