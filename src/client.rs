pub const DEFAULT_DATABASE: &str = "routes.db";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub database: String,
    pub seed: Option<String>,
    pub max_paths: Option<usize>,
    pub command: String,
    pub command_args: Vec<String>,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut database = String::from(DEFAULT_DATABASE);
        let mut seed = None;
        let mut max_paths = None;
        let mut command = String::from("status");
        let mut command_args = Vec::new();
        let mut command_set = false;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            if command_set {
                command_args.push(arg.to_string());
                continue;
            }
            match *arg {
                "--db" | "--database" => {
                    database = iter
                        .next()
                        .ok_or_else(|| "--db requires a value".to_string())?
                        .to_string();
                }
                "--seed" => {
                    seed = Some(
                        iter.next()
                            .ok_or_else(|| "--seed requires a value".to_string())?
                            .to_string(),
                    );
                }
                "--max-paths" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| "--max-paths requires a value".to_string())?;
                    max_paths = Some(
                        value
                            .parse::<usize>()
                            .map_err(|_| format!("invalid --max-paths value {value}"))?,
                    );
                }
                "--command" => {
                    command = iter
                        .next()
                        .ok_or_else(|| "--command requires a value".to_string())?
                        .to_string();
                    command_set = true;
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    command = arg.to_string();
                    command_set = true;
                }
            }
        }
        Ok(Self {
            database,
            seed,
            max_paths,
            command,
            command_args,
        })
    }

    pub fn help() -> &'static str {
        "Usage: routegraph [--db PATH] [--seed SEED.json] [--max-paths N] COMMAND [ARGS]\n\
         Commands:\n  \
           status\n  \
           nodes\n  \
           neighbors NODE\n  \
           add SOURCE DESTINATION WEIGHT\n  \
           delete SOURCE DESTINATION\n  \
           route SOURCE DESTINATION\n  \
           paths SOURCE DESTINATION\n  \
           components\n  \
           save\n"
    }
}
