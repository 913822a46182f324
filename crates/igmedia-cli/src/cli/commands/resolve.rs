//! `igmedia resolve` – resolve one media element.

use anyhow::{Context, Result};
use igmedia_core::page::har;
use igmedia_core::srcset::parse_srcset;
use igmedia_core::{MediaElement, MediaResolver, PageContext, ResolverConfig};

use crate::cli::ResolveArgs;

/// Media element described by the command-line flags.
pub fn build_element(args: &ResolveArgs) -> MediaElement {
    let element = if args.video {
        MediaElement::video(&args.src)
    } else {
        MediaElement::image(&args.src)
    };
    element
        .with_srcset(args.srcset.as_deref().map(parse_srcset).unwrap_or_default())
        .with_child_sources(args.sources.clone())
        .with_poster(args.poster.clone())
}

fn build_page(args: &ResolveArgs) -> Result<PageContext> {
    let page = match &args.html {
        Some(path) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("read HTML snapshot: {}", path.display()))?;
            PageContext::from_html(&args.page_url, &html)?
        }
        None => PageContext::for_url(&args.page_url)?,
    };
    Ok(match &args.har {
        Some(path) => page.with_resource_timing(har::resource_entries(path)?),
        None => page,
    })
}

pub async fn run_resolve(cfg: ResolverConfig, args: &ResolveArgs) -> Result<()> {
    let element = build_element(args);
    let page = build_page(args)?;
    let resolver = MediaResolver::with_curl(cfg);
    let resolved = resolver.resolve_traced(&element, &page).await?;
    println!("{}", resolved.url);
    if args.trace {
        println!("  via {}", resolved.source);
    }
    Ok(())
}
