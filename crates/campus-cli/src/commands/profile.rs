use super::output;
use crate::app::App;
use crate::prompt::PromptProviderFlow;
use anyhow::{Result, bail};
use campus_application::{ProfileEditor, ProfileForm, ProfileSetup};
use campus_core::config::CampusConfig;
use campus_core::error::CampusError;
use campus_core::profile::{Department, YearOfStudy};
use campus_infrastructure::CampusPaths;
use strum::IntoEnumIterator;

/// Field values given on the command line.
#[derive(Debug, Default)]
pub struct FieldOverrides {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub year_of_study: Option<String>,
    pub department: Option<String>,
}

impl FieldOverrides {
    fn apply(self, form: &mut ProfileForm) {
        let fields = [
            (self.full_name, &mut form.full_name),
            (self.phone, &mut form.phone),
            (self.address, &mut form.address),
            (self.year_of_study, &mut form.year_of_study),
            (self.department, &mut form.department),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

fn choices<T: IntoEnumIterator + ToString>() -> String {
    T::iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

fn report(err: CampusError) -> Result<()> {
    output::failure(&err.user_message());
    match err {
        CampusError::Validation {
            field: "year of study",
            ..
        } => output::hint(&format!("Choose one of: {}", choices::<YearOfStudy>())),
        CampusError::Validation {
            field: "department",
            ..
        } => output::hint(&format!("Choose one of: {}", choices::<Department>())),
        _ => tracing::debug!("[profile] {:?}", err),
    }
    bail!("profile not saved")
}

pub async fn setup(paths: &CampusPaths, config: &CampusConfig, overrides: FieldOverrides) -> Result<()> {
    let app = App::open(paths, config, PromptProviderFlow::new(None, None))?;
    app.resolved().await;

    let setup = ProfileSetup::new(app.sessions.clone(), config.routes.clone());
    let mut form = setup.form()?;
    overrides.apply(&mut form);

    match setup.submit(&form).await {
        Ok(next) => {
            output::success("Profile saved");
            let state = app.sessions.snapshot();
            output::navigation(&app.navigator().navigate(&state, &next)?);
            Ok(())
        }
        Err(err) => report(err),
    }
}

pub async fn edit(paths: &CampusPaths, config: &CampusConfig, overrides: FieldOverrides) -> Result<()> {
    let app = App::open(paths, config, PromptProviderFlow::new(None, None))?;
    app.resolved().await;

    let editor = ProfileEditor::new(app.sessions.clone());
    let mut form = editor.form()?;
    overrides.apply(&mut form);

    match editor.submit(&form).await {
        Ok(profile) => {
            output::success("Profile updated");
            output::profile(&profile);
            Ok(())
        }
        Err(err) => report(err),
    }
}

pub async fn show(paths: &CampusPaths, config: &CampusConfig, json: bool) -> Result<()> {
    let app = App::open(paths, config, PromptProviderFlow::new(None, None))?;
    let state = app.resolved().await;

    if state.identity.is_none() {
        bail!("not signed in");
    }
    if let Some(message) = state.profile_error() {
        bail!("profile unavailable: {}", message);
    }
    let Some(profile) = state.profile else {
        output::hint("No profile yet. Complete it with `campus profile setup`.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        output::profile(&profile);
    }
    Ok(())
}
