use clap::Parser;
use tagpage::application::{
    ConfigService, GenerateOptions, GenerateService, InitService, ListTagsService, RefreshService,
};
use tagpage::cli::{output, Cli, Commands};
use tagpage::error::TagPageError;
use tagpage::infrastructure::FileSystemVault;

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), TagPageError> {
    match cli.command {
        Commands::Init { path } => {
            InitService::execute(&path)?;
            println!("Initialized tagpage vault at {}", path.display());
            Ok(())
        }
        Commands::Generate {
            tag,
            output,
            mode,
            sort,
        } => {
            let vault = FileSystemVault::discover()?;
            let service = GenerateService::new(vault);

            let mode = mode
                .map(|m| m.parse().map_err(TagPageError::Config))
                .transpose()?;
            let sort = sort
                .map(|s| s.parse().map_err(TagPageError::Config))
                .transpose()?;

            let path = service.execute(GenerateOptions {
                tag,
                output,
                mode,
                sort,
            })?;
            println!("Wrote tag page: {}", path.display());
            Ok(())
        }
        Commands::Refresh => {
            let vault = FileSystemVault::discover()?;
            let service = RefreshService::new(vault);
            let refreshed = service.execute()?;
            print!("{}", output::format_refreshed_list(&refreshed));
            if refreshed.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Tags => {
            let vault = FileSystemVault::discover()?;
            let service = ListTagsService::new(vault);
            let tags = service.execute()?;
            print!("{}", output::format_tag_list(&tags));
            if tags.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let vault = FileSystemVault::discover()?;
            let service = ConfigService::new(vault);

            if list {
                let settings = service.list()?;
                println!("mode = {}", settings.mode);
                println!("sort = {}", settings.sort);
                println!("link-placement = {}", settings.link_placement);
                println!(
                    "title-template = {}",
                    settings.title_template.unwrap_or_default()
                );
                println!("frontmatter-key = {}", settings.frontmatter_key);
                println!("tag-page-dir = {}", settings.tag_page_dir);
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: tagpage config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: mode, sort, link-placement, title-template, \
                    frontmatter-key, tag-page-dir"
                );
                Ok(())
            }
        }
    }
}
