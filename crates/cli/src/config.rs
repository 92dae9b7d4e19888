use std::path::PathBuf;

/// Environment variable consulted when `-f` is not given.
pub const FILE_ENV: &str = "STAFFDB_FILE";

pub const USAGE: &str = "\
usage: staffdb -f <database file> [-n] [-a <name,address,hours>] [-l] [-s]

  -f, --file <path>   database file (or set STAFFDB_FILE)
  -n, --new           create a new database file
  -a, --add <line>    append an employee: name,address,hours
  -l, --list          list employees
  -s, --sync          fsync the file after writing
  -h, --help          show this help";

/// Options for one run of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    /// Create the file instead of opening an existing one.
    pub create: bool,
    pub add: Option<String>,
    pub list: bool,
    /// `sync_all` after rewriting the file.
    pub sync: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    /// Parses command-line arguments (program name already stripped).
    ///
    /// `env_file` is the value of [`FILE_ENV`], used when no `-f` is given.
    pub fn from_args<I>(args: I, env_file: Option<String>) -> Result<Command, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut path = None;
        let mut create = false;
        let mut add = None;
        let mut list = false;
        let mut sync = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-f" | "--file" => {
                    let value = args.next().ok_or("-f requires a file path")?;
                    path = Some(PathBuf::from(value));
                }
                "-a" | "--add" => {
                    let value = args.next().ok_or("-a requires name,address,hours")?;
                    if add.replace(value).is_some() {
                        return Err("-a may only be given once".to_string());
                    }
                }
                "-n" | "--new" => create = true,
                "-l" | "--list" => list = true,
                "-s" | "--sync" => sync = true,
                "-h" | "--help" => return Ok(Command::Help),
                other => return Err(format!("unknown argument: {other}")),
            }
        }

        let path = path
            .or_else(|| env_file.filter(|v| !v.is_empty()).map(PathBuf::from))
            .ok_or("filepath is a required argument")?;

        Ok(Command::Run(Config {
            path,
            create,
            add,
            list,
            sync,
        }))
    }
}
