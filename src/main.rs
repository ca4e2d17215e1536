use anyhow::Result;
use argh::FromArgs;
use pipesh::Shell;

#[derive(FromArgs)]
/// A minimal interactive shell that runs pipelines of external commands.
struct Options {
    /// prompt shown before each input line
    #[argh(option, default = "pipesh::DEFAULT_PROMPT.to_string()")]
    prompt: String,
}

fn main() -> Result<()> {
    let options: Options = argh::from_env();
    Shell::new(options.prompt).repl()
}
