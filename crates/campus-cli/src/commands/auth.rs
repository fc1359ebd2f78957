use super::output;
use crate::app::App;
use crate::prompt::PromptProviderFlow;
use anyhow::{Result, bail};
use campus_application::{LoginFlow, LoginMethod};
use campus_core::config::CampusConfig;
use campus_core::identity::OAuthProvider;
use campus_infrastructure::CampusPaths;

async fn sign_in(app: &App, method: LoginMethod) -> Result<()> {
    let flow = LoginFlow::new(app.sessions.clone(), app.navigator());
    match flow.submit(method).await {
        Ok(success) => {
            output::success(&format!("Signed in as {}", success.identity.label()));
            output::navigation(&success.navigation);
            if success.state.needs_profile_setup() {
                output::hint("Complete your profile with `campus profile setup`.");
            }
            Ok(())
        }
        Err(failure) => {
            tracing::debug!("[auth] {:?}", failure.source);
            output::failure(&failure.message);
            bail!("sign-in failed")
        }
    }
}

pub async fn register(
    paths: &CampusPaths,
    config: &CampusConfig,
    email: String,
    password: String,
) -> Result<()> {
    let app = App::open(paths, config, PromptProviderFlow::new(None, None))?;
    sign_in(&app, LoginMethod::Register { email, password }).await
}

pub async fn login(
    paths: &CampusPaths,
    config: &CampusConfig,
    email: String,
    password: String,
) -> Result<()> {
    let app = App::open(paths, config, PromptProviderFlow::new(None, None))?;
    sign_in(&app, LoginMethod::Password { email, password }).await
}

pub async fn login_with(
    paths: &CampusPaths,
    config: &CampusConfig,
    provider: OAuthProvider,
    email: Option<String>,
    display_name: Option<String>,
) -> Result<()> {
    let app = App::open(paths, config, PromptProviderFlow::new(email, display_name))?;
    sign_in(&app, LoginMethod::Provider(provider)).await
}

pub async fn logout(paths: &CampusPaths, config: &CampusConfig) -> Result<()> {
    let app = App::open(paths, config, PromptProviderFlow::new(None, None))?;
    let state = app.resolved().await;
    if state.identity.is_none() {
        output::hint("Nobody is signed in.");
        return Ok(());
    }

    app.sessions.logout().await?;
    app.sessions.wait_for(|state| state.identity.is_none()).await;
    output::success("Signed out");
    Ok(())
}

pub async fn status(paths: &CampusPaths, config: &CampusConfig, retry: bool) -> Result<()> {
    let app = App::open(paths, config, PromptProviderFlow::new(None, None))?;
    let mut state = app.resolved().await;

    if retry && state.profile_error().is_some() {
        state = app.sessions.retry_profile_fetch().await?;
    }

    output::session(&state);
    if state.needs_profile_setup() {
        output::hint("Complete your profile with `campus profile setup`.");
    } else if state.profile_error().is_some() {
        output::hint("Run `campus status --retry` to load the profile again.");
    }
    Ok(())
}
