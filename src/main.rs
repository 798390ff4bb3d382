use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use ccsettings::config::{discover_configs, load_merged_config, user_config_path};
use ccsettings::logging::init_logging;
use ccsettings::merge::create_multiple_merge_preview;
use ccsettings::report::{
	render_changes, render_loaded_templates, render_settings_summary, render_template_list,
};
use ccsettings::settings::{
	Settings, create_backup, read_settings, resolve_settings_path, settings_path, write_settings,
};
use ccsettings::templates::{TemplateLoader, list_builtin_templates, ordered_sources};

#[derive(Parser)]
#[command(name = "ccsettings")]
#[command(
	author,
	version,
	about = "Settings manager that applies settings templates to projects"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	/// Increase log verbosity (-v, -vv)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Apply settings templates to the current project
	Apply(ApplyArgs),
	/// List available built-in templates
	List,
	/// Show current settings
	Show {
		/// Show .claude/settings.local.json instead of settings.json
		#[arg(long)]
		local: bool,
	},
	/// Tool configuration commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Args)]
struct ApplyArgs {
	/// Apply a built-in or configured template (repeatable)
	#[arg(short = 't', long = "template", value_name = "NAME")]
	templates: Vec<String>,

	/// Apply a template from a local JSON file (repeatable)
	#[arg(short = 'f', long = "file", value_name = "PATH")]
	files: Vec<PathBuf>,

	/// Apply a template from an HTTPS URL (repeatable)
	#[arg(short = 'u', long = "url", value_name = "URL")]
	urls: Vec<String>,

	/// Preview changes without applying them
	#[arg(long)]
	dry_run: bool,

	/// Create a backup before applying changes
	#[arg(long)]
	backup: bool,

	/// Apply changes without confirmation
	#[arg(long)]
	force: bool,

	/// Apply to .claude/settings.local.json instead of settings.json
	#[arg(long)]
	local: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display config files in cascade order with their contents
	Show,
	/// Check all config files for errors without applying anything
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match cli.command {
		Commands::Apply(args) => handle_apply(args),
		Commands::List => handle_list(),
		Commands::Show { local } => handle_show(local),
		Commands::Config { action } => match action {
			ConfigAction::Show => handle_config_show(),
			ConfigAction::Validate => handle_config_validate(),
		},
	}
}

fn handle_apply(args: ApplyArgs) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let config = load_merged_config(&cwd).context("Failed to load configuration")?;

	let names = if args.templates.is_empty() && args.files.is_empty() && args.urls.is_empty() {
		config.default_templates.clone()
	} else {
		args.templates
	};
	let sources = ordered_sources(&names, &args.files, &args.urls);

	println!("Loading templates...");
	let loader = TemplateLoader::new().with_aliases(config.template_aliases());
	let loaded = loader.load_all(&sources).context("Failed to load templates")?;

	print!("{}", render_loaded_templates(&loaded.templates));
	if !loaded.failures.is_empty() {
		eprintln!("Warning: some templates failed to load:");
		for failure in &loaded.failures {
			eprintln!("  - {failure}");
		}
	}

	let local = args.local || config.local;
	let backup = args.backup || config.backup;
	let path = resolve_settings_path(&cwd, local);
	let existing = read_settings(&path)
		.with_context(|| format!("Failed to read settings: {}", path.display()))?;

	let (documents, template_names): (Vec<Settings>, Vec<String>) = loaded
		.templates
		.into_iter()
		.map(|t| (t.settings, t.name))
		.unzip();
	let preview = create_multiple_merge_preview(existing.as_ref(), &documents, &template_names);

	let label = if local {
		"local settings"
	} else {
		"shared settings"
	};
	println!();
	print!("{}", render_changes(&preview.changes, label));

	if args.dry_run {
		println!("\nDry-run mode: no changes were made");
		return Ok(ExitCode::SUCCESS);
	}

	if !args.force {
		let confirmed = dialoguer::Confirm::new()
			.with_prompt("Apply settings?")
			.default(false)
			.interact()
			.context("Failed to get user input (use --force to skip confirmation)")?;
		if !confirmed {
			println!("Application cancelled");
			return Ok(ExitCode::SUCCESS);
		}
	}

	if backup && existing.is_some() {
		match create_backup(&path) {
			Ok(backup_path) => println!("Backup created: {}", backup_path.display()),
			Err(e) => eprintln!("Warning: failed to create backup: {e}"),
		}
	}

	let path = settings_path(&cwd, local).context("Failed to prepare settings directory")?;
	write_settings(&path, &preview.merged)
		.with_context(|| format!("Failed to write {}", path.display()))?;

	if local {
		println!("Local settings applied successfully!");
	} else {
		println!("Settings applied successfully!");
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_list() -> Result<ExitCode> {
	print!("{}", render_template_list(&list_builtin_templates()));
	Ok(ExitCode::SUCCESS)
}

fn handle_show(local: bool) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let path = resolve_settings_path(&cwd, local);

	match read_settings(&path).with_context(|| format!("Failed to read {}", path.display()))? {
		Some(settings) => print!("{}", render_settings_summary(&path, &settings)),
		None => {
			println!("Settings file not found");
			println!("  Expected path: {}", path.display());
			println!("\nTo create settings:");
			println!("  ccsettings apply --template default");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("Configuration files (in cascade order):\n");

		for loaded in &configs {
			let config = &loaded.config;
			println!("# Source: {}", loaded.path.display());
			println!("# root: {}", config.root);
			if let Some(backup) = config.backup {
				println!("  backup: {}", backup);
			}
			if let Some(local) = config.local {
				println!("  local: {}", local);
			}
			if !config.default_templates.is_empty() {
				println!("  default-templates: {}", config.default_templates.join(", "));
			}
			for (name, path) in &config.templates {
				println!("  template {}: {}", name, path.display());
			}
			println!();
		}
	}

	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match discover_configs(&cwd) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} template aliases)",
						loaded.path.display(),
						loaded.config.templates.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}
