use campus_application::{Navigation, NavigationOutcome};
use campus_core::profile::StudentProfile;
use campus_core::route::RedirectReason;
use campus_core::session::{ProfileFetch, SessionState};
use colored::Colorize;

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn failure(message: &str) {
    println!("{} {}", "✗".red().bold(), message.red());
}

pub fn hint(message: &str) {
    println!("  {}", message.dimmed());
}

pub fn session(state: &SessionState) {
    let Some(identity) = &state.identity else {
        println!("{}", "Not signed in".yellow());
        return;
    };

    println!("{} {}", "Signed in as".bold(), identity.label().cyan());
    println!("  uid:      {}", identity.uid);
    if let Some(email) = &identity.email {
        println!("  email:    {}", email);
    }
    match identity.provider {
        Some(provider) => println!("  provider: {}", provider),
        None => println!("  provider: email/password"),
    }

    match &state.profile_fetch {
        ProfileFetch::Loaded => println!("  profile:  {}", "complete".green()),
        ProfileFetch::Missing => println!("  profile:  {}", "not set up".yellow()),
        ProfileFetch::Failed { message } => {
            println!("  profile:  {} ({})", "unavailable".red(), message)
        }
        ProfileFetch::Pending => println!("  profile:  loading"),
        ProfileFetch::Idle => {}
    }
}

pub fn profile(profile: &StudentProfile) {
    println!("  {:<15} {}", "Full name", profile.full_name);
    println!("  {:<15} {}", "Email", profile.email);
    println!("  {:<15} {}", "Phone", profile.phone);
    println!("  {:<15} {}", "Address", profile.address);
    println!("  {:<15} {}", "Year", profile.year_of_study);
    println!("  {:<15} {}", "Department", profile.department);
}

fn reason(reason: RedirectReason) -> &'static str {
    match reason {
        RedirectReason::NotAuthenticated => "sign-in required",
        RedirectReason::ProfileIncomplete => "profile not complete",
        RedirectReason::ProfileAlreadyComplete => "profile already complete",
    }
}

pub fn navigation(navigation: &Navigation) {
    println!("{} {}", "→".bold(), navigation.requested);
    for (to, why) in &navigation.redirects {
        println!("  {} {} {}", "↪".yellow(), to, format!("({})", reason(*why)).as_str().dimmed());
    }

    match &navigation.outcome {
        NavigationOutcome::Rendered(path) => println!("{} {}", "render".green().bold(), path),
        NavigationOutcome::Waiting(path) => println!("{} {}", "waiting".yellow().bold(), path),
        NavigationOutcome::Unavailable { path, message } => {
            println!("{} {}: {}", "unavailable".red().bold(), path, message);
        }
    }
}
