use linkvault_core::auth::{AuthService, Credentials, SignUpOutcome};

use crate::cli::AuthCommands;
use crate::commands::common::CommandContext;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, context: &CommandContext) -> Result<(), CliError> {
    let service = AuthService::new(context.api.clone());
    let profile_name = &context.profile_name;

    match command {
        AuthCommands::Signup {
            email,
            password,
            name,
        } => {
            let mut credentials = Credentials::new(email, password);
            if let Some(name) = name {
                credentials = credentials.with_name(name);
            }
            let report = service.sign_up(&credentials).await;
            let outcome = report
                .result
                .map_err(|_| CliError::Auth(report.message.text.clone()))?;
            println!("{}", report.message.text);
            match outcome {
                SignUpOutcome::SignedIn => println!("Profile '{profile_name}' is signed in."),
                SignUpOutcome::AccountCreated => {
                    println!("Run `linkvault auth signin --email <email> --password <password>`.");
                }
            }
            Ok(())
        }
        AuthCommands::Signin { email, password } => {
            let report = service.sign_in(&Credentials::new(email, password)).await;
            report
                .result
                .map_err(|_| CliError::Auth(report.message.text.clone()))?;
            println!("{} (profile '{profile_name}')", report.message.text);
            Ok(())
        }
        AuthCommands::Signout => {
            service.sign_out()?;
            println!("Signed out profile '{profile_name}'");
            Ok(())
        }
        AuthCommands::Status => {
            if context.api.session().is_signed_in() {
                println!("Profile '{profile_name}' is signed in.");
            } else {
                println!("Profile '{profile_name}' is not signed in.");
            }
            Ok(())
        }
    }
}
