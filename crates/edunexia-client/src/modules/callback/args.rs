use clap::{Args, ValueEnum};

#[derive(Args)]
pub struct CallbackArgs {
    #[arg(help = "Redirect location, e.g. http://localhost:3000/auth/callback?token=...")]
    pub url: String,
    #[arg(long, help = "Navigate immediately instead of waiting like the page does")]
    pub no_wait: bool,
    #[arg(long, value_enum, default_value_t = CallbackRecovery::Wait)]
    pub on_error: CallbackRecovery,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CallbackRecovery {
    /// Let the page redirect to login on its own.
    Wait,
    /// Go back to the login page right away.
    Login,
    /// Reload the callback page once and process it again.
    Reload,
}
