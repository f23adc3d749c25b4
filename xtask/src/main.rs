//! Build helpers: man pages and shell completions for `comment-markup`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::{Shell, generate_to};

#[derive(Parser)]
#[command(name = "xtask")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Write the man page to DIR
    Man {
        #[arg(long, default_value = "target/dist/man")]
        dir: PathBuf,
    },
    /// Write shell completions to DIR
    Completions {
        #[arg(long, default_value = "target/dist/completions")]
        dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().command {
        Task::Man { dir } => man(&dir),
        Task::Completions { dir } => completions(&dir),
    }
}

fn man(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let cmd = comment_markup::command();
    let path = dir.join("comment-markup.1");
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut buf)
        .context("failed to render man page")?;
    fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))?;

    for sub in cmd.get_subcommands() {
        let path = dir.join(format!("comment-markup-{}.1", sub.get_name()));
        let mut buf = Vec::new();
        clap_mangen::Man::new(sub.clone())
            .render(&mut buf)
            .context("failed to render man page")?;
        fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))?;
    }
    println!("man pages written to {}", dir.display());
    Ok(())
}

fn completions(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let mut cmd = comment_markup::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
        generate_to(shell, &mut cmd, "comment-markup", dir)
            .with_context(|| format!("failed to generate {shell} completions"))?;
    }
    println!("completions written to {}", dir.display());
    Ok(())
}
