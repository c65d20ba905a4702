//! Warehouse setup wizard binary.
//!
//! Interactive prompt that collects the five connection values and writes
//! them to a local `.env` file next to the executable's working directory.

use agentcanvas::SetupWizard;

fn main() -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut wizard = SetupWizard::new(stdin.lock(), std::io::stdout());
    let config = wizard.run()?;

    match config.write_env_file(".env") {
        Ok(()) => {
            println!();
            println!("Configuration saved to .env");
            println!("Restart the application to use warehouse data.");
            println!("Note: keep the .env file out of version control.");
        }
        Err(err) => {
            eprintln!("Error saving configuration: {err}");
            println!();
            println!("You can manually create a .env file with the following content:");
            println!("{}", config.render_env_file());
        }
    }

    Ok(())
}
