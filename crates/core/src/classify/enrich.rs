use crate::classify::context::ClassificationContext;
use crate::classify::matching::contains_term;
use crate::domain::chapter::Chapter;

const AUTOMOTIVE_HINT: &str = "car parts automotive vehicle";
const ELECTRONICS_HINT: &str = "electronics device gadget";
const APPAREL_HINT: &str = "apparel clothing";
const COSMETICS_HINT: &str = "cosmetics beauty skincare";
const WATCH_HINT: &str = "watch wristwatch";
const UNBRANDED_PART_HINT: &str = "car parts automotive industrial";
const BRANDED_PART_HINT: &str = "car parts";

/// Appends chapter hint words suggested by a first context pass so that the
/// second pass, and the rule keywords, see them.
pub fn enrich_name(name: &str, ctx: &ClassificationContext) -> String {
    let mut hints: Vec<&str> = Vec::new();

    match ctx.brand_chapter {
        Some(Chapter::AUTOMOTIVE) => hints.push(AUTOMOTIVE_HINT),
        Some(Chapter::ELECTRONICS) => hints.push(ELECTRONICS_HINT),
        Some(Chapter::APPAREL_KNIT) => hints.push(APPAREL_HINT),
        Some(Chapter::COSMETICS) => hints.push(COSMETICS_HINT),
        Some(Chapter::WATCHES) => hints.push(WATCH_HINT),
        _ => {}
    }

    if ctx.has_part_number {
        match ctx.brand_chapter {
            None => hints.push(UNBRANDED_PART_HINT),
            Some(Chapter::AUTOMOTIVE) => hints.push(BRANDED_PART_HINT),
            Some(_) => {}
        }
    }

    if contains_term(&name.to_lowercase(), "jdm") {
        hints.push(AUTOMOTIVE_HINT);
    }

    if hints.is_empty() {
        return name.to_owned();
    }
    format!("{name} {}", hints.join(" "))
}

#[cfg(test)]
mod tests {
    use super::enrich_name;
    use crate::classify::context::ClassificationContext;
    use crate::domain::chapter::Chapter;

    #[test]
    fn plain_names_are_left_alone() {
        assert_eq!(
            enrich_name("Men's Cotton T-Shirt", &ClassificationContext::default()),
            "Men's Cotton T-Shirt"
        );
    }

    #[test]
    fn brand_chapter_adds_hint_words() {
        let ctx = ClassificationContext {
            brand_chapter: Some(Chapter::WATCHES),
            ..ClassificationContext::default()
        };
        assert_eq!(enrich_name("Seiko Presage", &ctx), "Seiko Presage watch wristwatch");
    }

    #[test]
    fn part_numbers_add_automotive_hints() {
        let unbranded = ClassificationContext { has_part_number: true, ..Default::default() };
        assert_eq!(enrich_name("63217161955", &unbranded), "63217161955 car parts automotive industrial");

        let branded = ClassificationContext {
            brand_chapter: Some(Chapter::AUTOMOTIVE),
            has_part_number: true,
            ..Default::default()
        };
        assert_eq!(
            enrich_name("Honda 82871-671-000", &branded),
            "Honda 82871-671-000 car parts automotive vehicle car parts"
        );

        let electronics = ClassificationContext {
            brand_chapter: Some(Chapter::ELECTRONICS),
            has_part_number: true,
            ..Default::default()
        };
        assert_eq!(enrich_name("Sony 12345678", &electronics), "Sony 12345678 electronics device gadget");
    }

    #[test]
    fn jdm_marks_the_name_as_automotive() {
        let enriched = enrich_name("JDM tow hook", &ClassificationContext::default());
        assert_eq!(enriched, "JDM tow hook car parts automotive vehicle");
    }
}
