use super::output;
use crate::app::App;
use crate::prompt::PromptProviderFlow;
use anyhow::Result;
use campus_core::config::CampusConfig;
use campus_infrastructure::CampusPaths;
use colored::Colorize;

pub async fn navigate(paths: &CampusPaths, config: &CampusConfig, path: &str) -> Result<()> {
    let app = App::open(paths, config, PromptProviderFlow::new(None, None))?;
    let state = app.resolved().await;

    output::navigation(&app.navigator().navigate(&state, path)?);
    Ok(())
}

pub fn show(config: &CampusConfig) {
    let routes = &config.routes;
    println!("{}", "Routes".bold());
    println!("  {:<15} {}", "login", routes.login);
    println!("  {:<15} {}", "profile setup", routes.profile_setup);
    println!("  {:<15} {}", "home", routes.home);
    println!("  {:<15} {}", "protected", routes.protected.join(", "));
}
