use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use tracing_subscriber::EnvFilter;
use twig::areas::remote::Remote;
use twig::areas::repository::Repository;
use twig::artifacts::objects::object_type::ObjectType;
use twig::errors::TwigError;

/// Environment variable holding the log filter
const LOG_ENV: &str = "TWIG_LOG";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal version-control engine",
    long_about = "A content-addressed object store, a binary staging index, flat trees, \
    linear commits and a push to smart-HTTP git servers.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes a file (or standard input when the file is '-' or omitted) \
        and can write the object to the object database."
    )]
    HashObject {
        #[arg(short = 't', long = "type", default_value = "blob", help = "The object type")]
        object_type: String,
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1, help = "The file to hash")]
        file: Option<String>,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "This command stores the contents of the given files, or of every file under the \
        given directories, and stages them in the index."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(name = "ls-files", about = "Show the entries staged in the index")]
    LsFiles,
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the decompressed object, header included. \
        With -p only the object content is printed."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "Print the content without the header")]
        pretty: bool,
        #[arg(index = 1, help = "The object SHA to print")]
        sha: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged tree as a new commit on master. \
        The author is read from GIT_AUTHOR_NAME and GIT_AUTHOR_EMAIL."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "push",
        about = "Send master to a remote repository",
        long_about = "This command sends the commits and objects the remote is missing \
        over smart HTTP and moves the remote master to the local one."
    )]
    Push {
        #[arg(short = 'r', long, help = "The remote repository URL")]
        remote: String,
        #[arg(short = 'u', long, env = "TWIG_USERNAME", help = "The remote username")]
        username: Option<String>,
        #[arg(
            short = 'p',
            long,
            env = "TWIG_PASSWORD",
            hide_env_values = true,
            help = "The remote password"
        )]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { path } => {
            let path = path.unwrap_or_else(|| pwd.to_string_lossy().to_string());
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()))?;

            repository.init().await?
        }
        Commands::HashObject {
            object_type,
            write,
            file,
        } => {
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;
            let object_type = ObjectType::try_from(object_type.as_str())?;

            repository.hash_object(file.as_deref(), object_type, write)?;
        }
        Commands::Add { paths } => {
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.add(&paths).await?
        }
        Commands::LsFiles => {
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.ls_files().await?
        }
        Commands::CatFile { pretty, sha } => {
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.cat_file(&sha, pretty)?
        }
        Commands::Status => {
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.status().await?;
        }
        Commands::Commit { message } => {
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.commit(&message).await?;
        }
        Commands::Push {
            remote,
            username,
            password,
        } => {
            let username = username.ok_or(TwigError::ConfigMissing("TWIG_USERNAME"))?;
            let password = password.ok_or(TwigError::ConfigMissing("TWIG_PASSWORD"))?;
            let mut repository =
                Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository
                .push(&Remote::new(&remote, username, password))
                .await?;
        }
    }

    std::io::stdout().flush()?;

    Ok(())
}
