use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::{Parser, Subcommand};
use std::path::Path;

use crate::context::NoteCanvas;
use crate::draft;
use crate::filter::{Category, NoteFilter};
use note_canvas_types::Note;

#[derive(Parser)]
#[command(name = "note-canvas")]
#[command(about = "Personal notes, kept in sync with your Note Canvas account")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and log in
    Signup {
        name: String,
        email: String,
        password: String,
    },
    /// Log in and remember the session
    Login { email: String, password: String },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List notes
    List {
        /// Case-insensitive text to look for in title or content
        #[arg(short, long, default_value = "")]
        search: String,
        /// all, reminders, tasks, favorites or highlights
        #[arg(short, long, default_value = "all")]
        category: Category,
    },
    /// Create a note
    New {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Create it as a task
        #[arg(long)]
        task: bool,
    },
    /// Change a note's title or content
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Toggle the favorite flag
    Favorite { id: String },
    /// Toggle whether the note is a task
    Task { id: String },
    /// Toggle task completion
    Complete { id: String },
    /// Set a reminder, or clear it when no time is given
    Remind { id: String, when: Option<String> },
    /// Append a highlight
    Highlight { id: String, text: String },
    /// Attach an image file
    Image { id: String, path: String },
    /// Bookmark a URL on the note
    Url { id: String, url: String },
    /// Delete a note
    Delete { id: String },
}

pub async fn run(cli: Cli, app: &NoteCanvas) -> Result<()> {
    match cli.command {
        Commands::Signup { name, email, password } => {
            app.register(&name, &email, &password).await?;
            if app.is_logged_in() {
                println!("Account created, logged in as {}", name);
            } else {
                println!("Account created. Log in with `note-canvas login`.");
            }
        }
        Commands::Login { email, password } => {
            app.login(&email, &password).await?;
            let name = app.user_name().unwrap_or(email);
            println!("Logged in as {}", name);
        }
        Commands::Logout => {
            app.logout();
            println!("Logged out");
        }
        Commands::Whoami => {
            let user = app.current_user().await?;
            let name = user.name.unwrap_or_else(|| "(no name)".to_string());
            match user.email {
                Some(email) => println!("{} <{}>", name, email),
                None => println!("{}", name),
            }
        }
        Commands::List { search, category } => {
            require_login(app)?;
            app.notes().load().await?;
            let visible = app.notes().visible(&NoteFilter::new(search, category));
            if visible.is_empty() {
                println!("No notes");
            }
            for note in &visible {
                println!("{}", summary_line(note));
            }
        }
        Commands::New { title, content, task } => {
            require_login(app)?;
            let mut new = draft::blank();
            if let Some(title) = title {
                new.title = title;
            }
            if let Some(content) = content {
                new.content = content;
            }
            new.is_task = task;
            let note = app.notes().create(new).await?;
            println!("Created {}", summary_line(&note));
        }
        Commands::Edit { id, title, content } => {
            if title.is_none() && content.is_none() {
                bail!("nothing to change: pass --title and/or --content");
            }
            let note = with_loaded(app, &id, |app, id| async move {
                app.notes()
                    .modify(&id, move |n| {
                        if let Some(title) = title {
                            n.title = title;
                        }
                        if let Some(content) = content {
                            n.content = content;
                        }
                    })
                    .await
            })
            .await?;
            println!("Updated {}", summary_line(&note));
        }
        Commands::Favorite { id } => {
            let note = with_loaded(app, &id, |app, id| async move { app.notes().toggle_favorite(&id).await }).await?;
            println!("{}", summary_line(&note));
        }
        Commands::Task { id } => {
            let note = with_loaded(app, &id, |app, id| async move { app.notes().toggle_task(&id).await }).await?;
            println!("{}", summary_line(&note));
        }
        Commands::Complete { id } => {
            let note = with_loaded(app, &id, |app, id| async move { app.notes().toggle_completed(&id).await }).await?;
            println!("{}", summary_line(&note));
        }
        Commands::Remind { id, when } => {
            let note = with_loaded(app, &id, |app, id| async move { app.notes().set_reminder(&id, when).await }).await?;
            println!("{}", summary_line(&note));
        }
        Commands::Highlight { id, text } => {
            let note = with_loaded(app, &id, |app, id| async move { app.notes().add_highlight(&id, &text).await }).await?;
            println!("{} ({} highlights)", summary_line(&note), note.highlights.len());
        }
        Commands::Image { id, path } => {
            let data_url = image_data_url(Path::new(&path))?;
            let note = with_loaded(app, &id, |app, id| async move { app.notes().add_image(&id, &data_url).await }).await?;
            println!("{} ({} images)", summary_line(&note), note.images.len());
        }
        Commands::Url { id, url } => {
            let note = with_loaded(app, &id, |app, id| async move { app.notes().add_url(&id, &url).await }).await?;
            println!("{} ({} urls)", summary_line(&note), note.urls.len());
        }
        Commands::Delete { id } => {
            require_login(app)?;
            app.notes().remove(&id).await?;
            println!("Deleted {}", id);
        }
    }

    Ok(())
}

fn require_login(app: &NoteCanvas) -> Result<()> {
    if !app.is_logged_in() {
        bail!("not logged in: run `note-canvas login` first");
    }
    Ok(())
}

/// Load the cache, then run a derived mutation against `id`.
async fn with_loaded<'a, F, Fut>(app: &'a NoteCanvas, id: &str, op: F) -> Result<Note>
where
    F: FnOnce(&'a NoteCanvas, String) -> Fut,
    Fut: std::future::Future<Output = Result<Option<Note>, crate::error::ApiError>>,
{
    require_login(app)?;
    app.notes().load().await?;
    match op(app, id.to_string()).await? {
        Some(note) => Ok(note),
        None => bail!("no note with id {}", id),
    }
}

/// One-line listing: id, flags, title.
pub fn summary_line(note: &Note) -> String {
    let mut flags = String::new();
    flags.push(if note.is_favorite { '*' } else { ' ' });
    flags.push(match (note.is_task, note.is_completed) {
        (true, true) => 'x',
        (true, false) => 'o',
        (false, _) => ' ',
    });
    flags.push(if note.has_reminder() { '!' } else { ' ' });
    flags.push(if note.has_highlights() { '~' } else { ' ' });
    format!("{}  [{}]  {}", note.id, flags, note.title)
}

/// Read an image file and encode it as a `data:` URL.
pub fn image_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mime = mime_for(path)
        .with_context(|| format!("{} is not a supported image type", path.display()))?;
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::note;
    use tempfile::tempdir;

    #[test]
    fn test_summary_line_flags() {
        let mut n = note("66f1", "Groceries");
        assert_eq!(summary_line(&n), "66f1  [    ]  Groceries");

        n.is_favorite = true;
        n.is_task = true;
        n.reminder = Some("2024-10-01T09:00".to_string());
        n.highlights.push("milk".to_string());
        assert_eq!(summary_line(&n), "66f1  [*o!~]  Groceries");

        n.is_completed = true;
        assert_eq!(summary_line(&n), "66f1  [*x!~]  Groceries");

        // completion is only shown for tasks
        n.is_task = false;
        assert_eq!(summary_line(&n), "66f1  [* !~]  Groceries");
    }

    #[test]
    fn test_image_data_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pixel.PNG");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        assert_eq!(image_data_url(&path).unwrap(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_image_data_url_rejects_unknown_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hi").unwrap();

        assert!(image_data_url(&path).is_err());
    }

    #[test]
    fn test_cli_parses_category() {
        let cli = Cli::try_parse_from(["note-canvas", "list", "--category", "Tasks", "-s", "milk"]).unwrap();
        match cli.command {
            Commands::List { search, category } => {
                assert_eq!(search, "milk");
                assert_eq!(category, Category::Tasks);
            }
            _ => panic!("expected list"),
        }
        assert!(Cli::try_parse_from(["note-canvas", "list", "--category", "archived"]).is_err());
    }
}
