pub mod bootstrap;
pub mod cli;
pub mod commands;

pub use bootstrap::AppContext;
pub use cli::{Cli, Command};

/// Execute one parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = AppContext::bootstrap(cli.server)?;

    match cli.command {
        Command::Login { email, password } => commands::login(&ctx, &email, &password).await,
        Command::Register {
            name,
            email,
            password,
        } => commands::register(&ctx, &name, &email, &password).await,
        Command::Logout => commands::logout(&ctx).await,
        Command::List {
            filters,
            pages,
            all,
            sort,
            desc,
        } => {
            let pages = (!all).then_some(pages);
            commands::list(&ctx, filters.signature(), pages, cli::sort_spec(sort, desc)).await
        }
        Command::Facets { filters, pages } => {
            commands::facets(&ctx, filters.signature(), pages).await
        }
        Command::Show { id } => commands::show(&ctx, id).await,
        Command::Add(args) => commands::add(&ctx, args).await,
        Command::Edit(args) => commands::edit(&ctx, args).await,
        Command::Delete { id } => commands::delete(&ctx, id).await,
        Command::Config { save } => commands::config(&ctx, save),
    }
}
