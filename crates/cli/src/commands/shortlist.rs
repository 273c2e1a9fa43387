use tariffy_core::{ClassificationEngine, Shortlist};

use crate::commands::classify::ClassifyArgs;
use crate::commands::CommandResult;

pub fn run(args: ClassifyArgs) -> CommandResult {
    let product = args.product();
    if let Err(error) = product.ensure_classifiable() {
        return CommandResult::failure("shortlist", "invalid_input", error.to_string(), 6);
    }

    let shortlist = ClassificationEngine::standard().shortlist(&product);
    if args.json {
        return CommandResult::success_with("shortlist", "relevant chapters", &shortlist);
    }
    CommandResult::text(render_human(&shortlist))
}

fn render_human(shortlist: &Shortlist) -> String {
    if shortlist.is_default {
        let chapters: Vec<String> = shortlist.chapters.iter().map(ToString::to_string).collect();
        return format!("no chapter signal; default shortlist: {}", chapters.join(", "));
    }
    shortlist
        .scores
        .iter()
        .map(|entry| format!("{}  score {:.1}", entry.chapter, entry.score))
        .collect::<Vec<_>>()
        .join("\n")
}
