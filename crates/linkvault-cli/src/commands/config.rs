use linkvault_core::config::normalize_base_url;
use linkvault_core::session::{FileTokenStore, TokenPersistence};
use linkvault_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config_profiles::{default_config_path, session_token_path, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(
    command: ConfigCommands,
    global_profile: Option<&str>,
    api_url: Option<String>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_base_url,
            app_origin,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            api_base_url.or(api_url),
            app_origin,
            no_activate,
        ),
        ConfigCommands::Show => run_config_show(global_profile, api_url),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    api_base_url: Option<String>,
    app_origin: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);

    let api_base_url = normalize_text_option(api_base_url)
        .map(|url| normalize_base_url(&url, "api_base_url"))
        .transpose()?;
    let app_origin = normalize_text_option(app_origin)
        .map(|url| normalize_base_url(&url, "app_origin"))
        .transpose()?;

    let profile = config.profile_mut_or_default(&profile_name);
    if let Some(value) = api_base_url {
        profile.api_base_url = Some(value);
    }
    if let Some(value) = app_origin {
        profile.app_origin = Some(value);
    }

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );
    println!(
        "Run `linkvault auth signin --email <email> --password <password>` to sign in."
    );
    Ok(())
}

pub fn run_config_show(global_profile: Option<&str>, api_url: Option<String>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let client_config = config.client_config(&profile_name, api_url)?;
    let config_path = default_config_path().map_err(CliError::Config)?;
    let token_path = session_token_path(&profile_name).map_err(CliError::Config)?;
    let signed_in = FileTokenStore::new(&token_path).load_token()?.is_some();

    for line in render_config_lines(
        &profile_name,
        config.profile(&profile_name).is_some(),
        &client_config,
        &config_path,
        signed_in,
    ) {
        println!("{line}");
    }
    Ok(())
}

pub fn render_config_lines(
    profile_name: &str,
    stored: bool,
    client_config: &linkvault_core::config::ClientConfig,
    config_path: &std::path::Path,
    signed_in: bool,
) -> Vec<String> {
    vec![
        format!(
            "profile:      {profile_name}{}",
            if stored { "" } else { " (not saved)" }
        ),
        format!("api_base_url: {}", client_config.api_base_url),
        format!(
            "app_origin:   {}",
            client_config.app_origin.as_str().trim_end_matches('/')
        ),
        format!("config_file:  {}", config_path.display()),
        format!("signed_in:    {}", if signed_in { "yes" } else { "no" }),
    ]
}
