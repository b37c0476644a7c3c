//! Command-line and environment configuration.

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-term", version, about = "Keep a remote todo list from the terminal")]
pub struct Config {
    /// Base URL of the todo collection service
    #[arg(long, env = "TODO_API_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "TODO_LOG", default_value = "warn")]
    pub log: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = Config::try_parse_from(["todo-term"]).unwrap();
        assert_eq!(config.log, "warn");
        // TODO_API_URL may be set in the environment running the tests.
        if std::env::var_os("TODO_API_URL").is_none() {
            assert_eq!(config.base_url, "http://localhost:8000");
        }
    }

    #[test]
    fn base_url_flag_overrides_default() {
        let config =
            Config::try_parse_from(["todo-term", "--base-url", "http://todo.internal:9000/"])
                .unwrap();
        assert_eq!(config.base_url, "http://todo.internal:9000/");
    }
}
