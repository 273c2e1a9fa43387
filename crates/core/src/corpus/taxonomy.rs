use std::collections::BTreeMap;

use crate::domain::chapter::Chapter;
use crate::errors::DomainError;

// Marketplace category names are matched lowercased. Leaf order is kept because
// partial matches break length ties by position.

pub(crate) const LEAF_CATEGORIES: &[(&str, u8)] = &[
    ("wristwatches", 91),
    ("pocket watches", 91),
    ("watch accessories", 91),
    ("watch bands", 91),
    ("watch parts", 91),
    ("watch cases", 91),
    ("watch tools & repair kits", 91),
    ("watches", 91),
    ("clocks", 91),
    ("clock parts & tools", 91),
    ("wall clocks", 91),
    ("alarm clocks & clock radios", 91),
    ("mantel & shelf clocks", 91),
    ("grandfather clocks", 91),
    ("cuckoo clocks", 91),
    ("rings", 71),
    ("necklaces & pendants", 71),
    ("earrings", 71),
    ("bracelets", 71),
    ("brooches & pins", 71),
    ("fine jewelry sets", 71),
    ("fine anklets", 71),
    ("fine charms & charm bracelets", 71),
    ("fashion necklaces & pendants", 71),
    ("fashion earrings", 71),
    ("fashion bracelets", 71),
    ("fashion rings", 71),
    ("fashion brooches & pins", 71),
    ("fashion jewelry sets", 71),
    ("body jewelry", 71),
    ("charms & charm bracelets", 71),
    ("loose diamonds & gemstones", 71),
    ("loose beads", 71),
    ("men's shirts", 62),
    ("men's t-shirts", 61),
    ("men's pants", 62),
    ("men's jeans", 62),
    ("men's shorts", 62),
    ("men's coats, jackets & vests", 62),
    ("men's sweaters", 61),
    ("men's hoodies & sweatshirts", 61),
    ("men's suits & suit separates", 62),
    ("men's activewear", 61),
    ("men's underwear", 61),
    ("men's socks", 61),
    ("men's sleepwear & robes", 62),
    ("men's swimwear", 62),
    ("men's uniforms", 62),
    ("men's costumes", 62),
    ("men's clothing", 62),
    ("women's dresses", 62),
    ("women's tops", 62),
    ("women's t-shirts", 61),
    ("women's pants", 62),
    ("women's jeans", 62),
    ("women's shorts", 62),
    ("women's coats, jackets & vests", 62),
    ("women's sweaters", 61),
    ("women's hoodies & sweatshirts", 61),
    ("women's skirts", 62),
    ("women's suits & suit separates", 62),
    ("women's activewear", 61),
    ("women's intimates & sleepwear", 62),
    ("women's swimwear", 62),
    ("women's maternity", 62),
    ("women's costumes", 62),
    ("women's clothing", 62),
    ("boys' clothing", 62),
    ("girls' clothing", 62),
    ("baby clothing", 62),
    ("unisex kids' clothing", 62),
    ("men's shoes", 64),
    ("women's shoes", 64),
    ("boys' shoes", 64),
    ("girls' shoes", 64),
    ("baby shoes", 64),
    ("unisex shoes", 64),
    ("athletic shoes", 64),
    ("sneakers", 64),
    ("boots", 64),
    ("sandals", 64),
    ("slippers", 64),
    ("flats", 64),
    ("heels", 64),
    ("loafers & slip ons", 64),
    ("oxfords & dress shoes", 64),
    ("women's bags & handbags", 42),
    ("men's bags", 42),
    ("backpacks", 42),
    ("briefcases & laptop bags", 42),
    ("wallets", 42),
    ("coin purses", 42),
    ("travel luggage", 42),
    ("luggage", 42),
    ("suitcases", 42),
    ("duffel bags", 42),
    ("tote bags", 42),
    ("crossbody bags", 42),
    ("clutch bags", 42),
    ("messenger bags", 42),
    ("fanny packs", 42),
    ("belts", 42),
    ("key chains, rings & finders", 73),
    ("sunglasses", 90),
    ("eyeglass frames", 90),
    ("hats", 65),
    ("caps", 65),
    ("baseball caps", 65),
    ("beanies", 65),
    ("sun hats & visors", 65),
    ("scarves & wraps", 62),
    ("gloves & mittens", 62),
    ("ties, bow ties & cravats", 62),
    ("umbrellas", 66),
    ("hair accessories", 96),
    ("watches, parts & accessories", 91),
    ("cell phones & smartphones", 85),
    ("cell phone cases, covers & skins", 42),
    ("cell phone screen protectors", 39),
    ("cell phone chargers & cradles", 85),
    ("cell phone batteries", 85),
    ("cell phone cables & adapters", 85),
    ("headsets", 85),
    ("cell phone accessories", 85),
    ("smart watches", 91),
    ("smart watch accessories", 91),
    ("smart watch bands", 91),
    ("laptops & netbooks", 84),
    ("desktops & all-in-ones", 84),
    ("tablets & ereaders", 84),
    ("monitors, projectors & accs", 85),
    ("monitors", 85),
    ("projectors", 85),
    ("printers, scanners & supplies", 84),
    ("printers", 84),
    ("scanners", 84),
    ("keyboards & mice", 84),
    ("computer components & parts", 84),
    ("drives, storage & blank media", 84),
    ("networking", 85),
    ("routers", 85),
    ("switches & hubs", 85),
    ("power protection, distribution", 85),
    ("computer cables & connectors", 85),
    ("tv, video & home audio", 85),
    ("televisions", 85),
    ("home theater projectors", 85),
    ("home audio", 85),
    ("speakers", 85),
    ("headphones", 85),
    ("earbuds", 85),
    ("portable audio & headphones", 85),
    ("mp3 players", 85),
    ("portable cd players", 85),
    ("vehicle electronics & gps", 85),
    ("car audio", 85),
    ("car video", 85),
    ("gps units", 85),
    ("multipurpose batteries & power", 85),
    ("batteries", 85),
    ("video game consoles", 95),
    ("video games", 95),
    ("digital cameras", 90),
    ("film cameras", 90),
    ("camcorders", 85),
    ("camera drones", 88),
    ("lenses & filters", 90),
    ("flashes & flash accessories", 90),
    ("tripods & monopods", 90),
    ("camera bags & cases", 42),
    ("binoculars & telescopes", 90),
    ("binoculars & monoculars", 90),
    ("telescopes", 90),
    ("microscopes", 90),
    ("car & truck parts & accessories", 87),
    ("car & truck parts", 87),
    ("motorcycle parts", 87),
    ("atv, side-by-side & utv parts", 87),
    ("boat parts", 89),
    ("automotive tools & supplies", 82),
    ("automotive paints & supplies", 32),
    ("oils, fluids, lubricants & sealers", 27),
    ("tires & wheels", 40),
    ("brakes & brake parts", 87),
    ("engine cooling parts", 87),
    ("engines & components", 87),
    ("exhaust parts", 87),
    ("exterior parts & accessories", 87),
    ("interior parts & accessories", 87),
    ("lighting & lamps", 87),
    ("starters, alternators, ecus & wiring", 87),
    ("steering & suspension", 87),
    ("transmission & drivetrain", 87),
    ("air & fuel delivery", 87),
    ("ignition systems & components", 87),
    ("filters", 87),
    ("furniture", 94),
    ("sofas, armchairs & couches", 94),
    ("tables", 94),
    ("chairs", 94),
    ("beds & mattresses", 94),
    ("bookcases & shelving", 94),
    ("desks & tables", 94),
    ("cabinets & cupboards", 94),
    ("lamps, lighting & ceiling fans", 94),
    ("ceiling lights & chandeliers", 94),
    ("wall fixtures", 94),
    ("table lamps", 94),
    ("floor lamps", 94),
    ("rugs & carpets", 57),
    ("window treatments & hardware", 63),
    ("curtains & drapes", 63),
    ("bedding", 63),
    ("sheets & pillowcases", 63),
    ("comforters & sets", 63),
    ("quilts & bedspreads", 63),
    ("blankets & throws", 63),
    ("pillows", 63),
    ("bath towels", 63),
    ("bath", 63),
    ("kitchen, dining & bar", 69),
    ("dinnerware & serveware", 69),
    ("cookware", 73),
    ("bakeware", 73),
    ("flatware, knives & cutlery", 82),
    ("small kitchen appliances", 85),
    ("major appliances", 84),
    ("refrigerators & freezers", 84),
    ("washers & dryers", 84),
    ("dishwashers", 84),
    ("vacuums", 85),
    ("candles & home fragrance", 34),
    ("home décor", 94),
    ("vases", 69),
    ("picture frames", 44),
    ("mirrors", 70),
    ("yard, garden & outdoor living", 94),
    ("outdoor furniture", 94),
    ("garden tools & equipment", 82),
    ("lawn mowers", 84),
    ("grills & outdoor cooking", 73),
    ("storage & organization", 39),
    ("cleaning supplies", 34),
    ("cycling", 87),
    ("bicycles", 87),
    ("cycling parts & components", 87),
    ("golf", 95),
    ("golf clubs", 95),
    ("golf bags", 42),
    ("tennis & racquet sports", 95),
    ("fishing", 95),
    ("hunting", 93),
    ("camping & hiking", 63),
    ("tents & canopies", 63),
    ("sleeping bags", 94),
    ("fitness, running & yoga", 95),
    ("exercise & fitness equipment", 95),
    ("team sports", 95),
    ("water sports", 95),
    ("winter sports", 95),
    ("skiing & snowboarding", 95),
    ("skateboarding & longboarding", 95),
    ("boxing & martial arts", 95),
    ("outdoor sports", 95),
    ("action figures", 95),
    ("dolls & bears", 95),
    ("dolls", 95),
    ("stuffed animals", 95),
    ("building toys", 95),
    ("lego sets & packs", 95),
    ("diecast & toy vehicles", 95),
    ("model railroads & trains", 95),
    ("rc model vehicles, toys & control line", 95),
    ("games", 95),
    ("board & traditional games", 95),
    ("card games & poker", 95),
    ("puzzles", 95),
    ("outdoor toys & structures", 95),
    ("educational", 95),
    ("preschool toys & pretend play", 95),
    ("electronic, battery & wind-up", 95),
    ("toy vehicles", 95),
    ("models & kits", 95),
    ("hobby rc cars, trucks & motorcycles", 95),
    ("fragrances", 33),
    ("men's fragrances", 33),
    ("women's fragrances", 33),
    ("unisex fragrances", 33),
    ("skin care", 33),
    ("makeup", 33),
    ("face makeup", 33),
    ("eye makeup", 33),
    ("lip makeup", 33),
    ("nail care, manicure & pedicure", 33),
    ("nail polish", 33),
    ("hair care & styling", 33),
    ("shampoos & conditioners", 34),
    ("bath & body", 33),
    ("oral care", 96),
    ("toothbrushes", 96),
    ("shaving & hair removal", 82),
    ("razors & razor blades", 82),
    ("health care", 30),
    ("vitamins & dietary supplements", 21),
    ("medical & mobility", 90),
    ("massage equipment", 90),
    ("vision care", 90),
    ("guitars & basses", 92),
    ("guitars", 92),
    ("bass guitars", 92),
    ("drums & percussion", 92),
    ("pianos, keyboards & organs", 92),
    ("brass", 92),
    ("woodwinds", 92),
    ("string", 92),
    ("pro audio equipment", 85),
    ("microphones", 85),
    ("amplifiers", 85),
    ("dj equipment", 85),
    ("stage lighting & effects", 85),
    ("books", 49),
    ("fiction books", 49),
    ("nonfiction books", 49),
    ("textbooks, education & reference", 49),
    ("children's & young adults", 49),
    ("magazines", 49),
    ("comic books", 49),
    ("dvds & blu-ray discs", 85),
    ("vhs tapes", 85),
    ("cds", 85),
    ("vinyl records", 85),
    ("cassettes", 85),
    ("art", 97),
    ("paintings", 97),
    ("art prints", 49),
    ("art photographs", 49),
    ("sculptures & carvings", 97),
    ("antiques", 97),
    ("coins & paper money", 71),
    ("coins", 71),
    ("paper money", 49),
    ("stamps", 49),
    ("sports memorabilia", 95),
    ("trading cards", 49),
    ("pottery & glass", 69),
    ("pottery & china", 69),
    ("glass", 70),
    ("decorative collectibles", 69),
    ("figurines", 69),
    ("heavy equipment, parts & attachments", 84),
    ("heavy equipment", 84),
    ("cnc, metalworking & manufacturing", 84),
    ("office", 84),
    ("printing & graphic arts", 84),
    ("restaurant & food service", 84),
    ("test, measurement & inspection", 90),
    ("electrical equipment & supplies", 85),
    ("hydraulics, pneumatics, pumps & plumbing", 84),
    ("industrial automation & motion controls", 84),
    ("material handling", 84),
    ("light industrial equipment & tools", 84),
    ("sewing", 84),
    ("sewing machines", 84),
    ("fabric", 50),
    ("yarn", 56),
    ("needlecrafts & yarn", 56),
    ("beads & jewelry making", 71),
    ("scrapbooking & paper crafts", 48),
    ("dog supplies", 42),
    ("cat supplies", 42),
    ("fish & aquariums", 84),
    ("bird supplies", 42),
    ("small animal supplies", 42),
    ("strollers & accessories", 87),
    ("car safety seats", 94),
    ("baby feeding", 39),
    ("baby bottles", 39),
    ("diapering", 96),
    ("nursery furniture", 94),
    ("baby gear", 94),
    ("baby toys", 95),
    ("coffee", 9),
    ("tea", 9),
    ("gourmet chocolates", 18),
    ("candy, gum & chocolate", 17),
    ("spices, seasonings & extracts", 9),
    ("pens & writing instruments", 96),
    ("lighters", 96),
    ("knives, swords & blades", 82),
    ("tool sets & kits", 82),
    ("hand tools", 82),
    ("power tools", 84),
    ("air tools", 84),
];

pub(crate) const PARENT_CATEGORIES: &[(&str, u8)] = &[
    ("jewelry & watches", 71),
    ("watches, parts & accessories", 91),
    ("fine jewelry", 71),
    ("fashion jewelry", 71),
    ("clothing, shoes & accessories", 62),
    ("men", 62),
    ("women", 62),
    ("cell phones & accessories", 85),
    ("computers/tablets & networking", 84),
    ("computers, tablets & networking", 84),
    ("consumer electronics", 85),
    ("cameras & photo", 90),
    ("ebay motors", 87),
    ("parts & accessories", 87),
    ("home & garden", 94),
    ("sporting goods", 95),
    ("toys & hobbies", 95),
    ("health & beauty", 33),
    ("musical instruments & gear", 92),
    ("books, comics & magazines", 49),
    ("collectibles & art", 97),
    ("business & industrial", 84),
    ("crafts", 48),
    ("pet supplies", 42),
    ("baby", 62),
    ("movies & tv", 85),
    ("music", 85),
];

pub(crate) const ITEM_TYPES: &[(&str, u8)] = &[
    ("wristwatch", 91),
    ("wristwatches", 91),
    ("analog watch", 91),
    ("digital watch", 91),
    ("smartwatch", 91),
    ("pocket watch", 91),
    ("clock", 91),
    ("watch", 91),
    ("dive watch", 91),
    ("dress watch", 91),
    ("sport watch", 91),
    ("chronograph", 91),
    ("necklace", 71),
    ("bracelet", 71),
    ("ring", 71),
    ("earring", 71),
    ("earrings", 71),
    ("pendant", 71),
    ("brooch", 71),
    ("anklet", 71),
    ("charm", 71),
    ("smartphone", 85),
    ("cell phone", 85),
    ("mobile phone", 85),
    ("tablet", 84),
    ("laptop", 84),
    ("desktop", 84),
    ("headphones", 85),
    ("earbuds", 85),
    ("speaker", 85),
    ("camera", 90),
    ("digital camera", 90),
    ("television", 85),
    ("monitor", 85),
    ("printer", 84),
    ("scanner", 84),
    ("router", 85),
    ("keyboard", 92),
    ("phone case", 42),
    ("cell phone case", 42),
    ("mouse", 84),
    ("shirt", 62),
    ("t-shirt", 61),
    ("jacket", 62),
    ("coat", 62),
    ("pants", 62),
    ("jeans", 62),
    ("dress", 62),
    ("skirt", 62),
    ("sweater", 61),
    ("hoodie", 61),
    ("suit", 62),
    ("blazer", 62),
    ("shorts", 62),
    ("vest", 62),
    ("sneakers", 64),
    ("boots", 64),
    ("sandals", 64),
    ("loafers", 64),
    ("athletic shoes", 64),
    ("running shoes", 64),
    ("heels", 64),
    ("flats", 64),
    ("oxfords", 64),
    ("slippers", 64),
    ("handbag", 42),
    ("backpack", 42),
    ("wallet", 42),
    ("tote bag", 42),
    ("crossbody bag", 42),
    ("clutch", 42),
    ("briefcase", 42),
    ("suitcase", 42),
    ("duffel bag", 42),
    ("messenger bag", 42),
    ("action figure", 95),
    ("doll", 95),
    ("board game", 95),
    ("puzzle", 95),
    ("stuffed animal", 95),
    ("building set", 95),
    ("brake pad", 87),
    ("air filter", 87),
    ("headlight", 87),
    ("bumper", 87),
    ("spark plug", 87),
    ("alternator", 87),
    ("sofa", 94),
    ("table", 94),
    ("chair", 94),
    ("desk", 94),
    ("bed", 94),
    ("bookcase", 94),
    ("perfume", 33),
    ("eau de toilette", 33),
    ("eau de parfum", 33),
    ("cologne", 33),
    ("lipstick", 33),
    ("mascara", 33),
    ("foundation", 33),
    ("concealer", 33),
    ("moisturizer", 33),
    ("serum", 33),
    ("sunscreen", 33),
    ("acoustic guitar", 92),
    ("electric guitar", 92),
    ("bass guitar", 92),
    ("drum set", 92),
    ("violin", 92),
    ("trumpet", 92),
    ("flute", 92),
    ("hat", 65),
    ("cap", 65),
    ("baseball cap", 65),
    ("beanie", 65),
];

/// Category path fragments used by the shortlist selector. A fragment may point
/// at more than one chapter.
pub(crate) const CATEGORY_HINTS: &[(&str, &[u8])] = &[
    ("clothing", &[61, 62]),
    ("apparel", &[61, 62]),
    ("shoes", &[64]),
    ("footwear", &[64]),
    ("bags", &[42]),
    ("handbag", &[42]),
    ("luggage", &[42]),
    ("watches", &[91]),
    ("jewelry", &[71]),
    ("electronics", &[85]),
    ("cell phones", &[85]),
    ("computers", &[84]),
    ("tablets", &[84]),
    ("laptops", &[84]),
    ("cameras", &[85]),
    ("auto parts", &[87]),
    ("car parts", &[87]),
    ("vehicle parts", &[87]),
    ("motors", &[87]),
    ("toys", &[95]),
    ("sporting goods", &[95]),
    ("cosmetics", &[33]),
    ("health & beauty", &[33]),
    ("skin care", &[33]),
    ("fragrance", &[33]),
    ("home & garden", &[94]),
    ("furniture", &[94]),
    ("kitchen", &[73, 69]),
    ("musical instruments", &[92]),
    ("books", &[49]),
    ("pet supplies", &[42]),
];

/// Attribute fields consulted, in priority order, for a product type.
pub const TYPE_FIELDS: &[&str] = &["Type", "Category", "Product Type", "Sub-Type"];

/// Watch movements that corroborate a watch brand.
pub const WATCH_MOVEMENTS: &[&str] =
    &["quartz", "automatic", "mechanical", "solar", "kinetic", "eco-drive"];

#[derive(Clone, Debug, Default)]
pub struct MarketplaceTaxonomy {
    leaf: Vec<(String, Chapter)>,
    leaf_index: BTreeMap<String, usize>,
    parent: BTreeMap<String, Chapter>,
    item_types: BTreeMap<String, Chapter>,
    category_hints: Vec<(String, Vec<Chapter>)>,
}

impl MarketplaceTaxonomy {
    pub fn standard() -> Self {
        let mut taxonomy = Self::default();
        for (name, chapter) in LEAF_CATEGORIES {
            taxonomy.insert_leaf(name, Chapter::of(*chapter));
        }
        for (name, chapter) in PARENT_CATEGORIES {
            taxonomy.parent.insert((*name).to_owned(), Chapter::of(*chapter));
        }
        for (value, chapter) in ITEM_TYPES {
            taxonomy.item_types.insert((*value).to_owned(), Chapter::of(*chapter));
        }
        taxonomy.category_hints = CATEGORY_HINTS
            .iter()
            .map(|(fragment, chapters)| {
                ((*fragment).to_owned(), chapters.iter().map(|number| Chapter::of(*number)).collect())
            })
            .collect();
        taxonomy
    }

    /// Re-inserting a name overwrites its chapter but keeps its position.
    pub fn insert_leaf(&mut self, name: &str, chapter: Chapter) {
        let key = normalize(name);
        match self.leaf_index.get(&key) {
            Some(position) => self.leaf[*position].1 = chapter,
            None => {
                self.leaf_index.insert(key.clone(), self.leaf.len());
                self.leaf.push((key, chapter));
            }
        }
    }

    pub fn leaf_exact(&self, name: &str) -> Option<Chapter> {
        self.leaf_index.get(&normalize(name)).map(|position| self.leaf[*position].1)
    }

    /// Longest leaf key that contains, or is contained in, `name`. Ties go to
    /// the earlier entry.
    pub fn leaf_partial(&self, name: &str) -> Option<(&str, Chapter)> {
        let name = normalize(name);
        if name.is_empty() {
            return None;
        }
        self.leaf
            .iter()
            .filter(|(key, _)| name.contains(key.as_str()) || key.contains(name.as_str()))
            .fold(None, |best: Option<&(String, Chapter)>, entry| match best {
                Some(current) if current.0.len() >= entry.0.len() => Some(current),
                _ => Some(entry),
            })
            .map(|(key, chapter)| (key.as_str(), *chapter))
    }

    pub fn parent(&self, name: &str) -> Option<Chapter> {
        self.parent.get(&normalize(name)).copied()
    }

    pub fn item_type(&self, value: &str) -> Option<Chapter> {
        self.item_types.get(&normalize(value)).copied()
    }

    pub fn category_hints(&self) -> impl Iterator<Item = (&str, &[Chapter])> {
        self.category_hints.iter().map(|(fragment, chapters)| (fragment.as_str(), chapters.as_slice()))
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf.len()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let blank = self
            .leaf
            .iter()
            .map(|(key, _)| key)
            .chain(self.parent.keys())
            .chain(self.item_types.keys())
            .any(|key| key.trim().is_empty());
        if blank {
            return Err(DomainError::InvariantViolation("blank marketplace category name".to_owned()));
        }
        if self.leaf_index.len() != self.leaf.len() {
            return Err(DomainError::InvariantViolation("leaf category index is out of sync".to_owned()));
        }
        Ok(())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Splits `A > B > C` into trimmed, lowercased segments, deepest first.
pub fn path_levels(category_path: &str) -> Vec<String> {
    category_path
        .split('>')
        .map(normalize)
        .filter(|segment| !segment.is_empty())
        .rev()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{path_levels, MarketplaceTaxonomy};
    use crate::domain::chapter::Chapter;

    #[test]
    fn path_levels_are_deepest_first() {
        assert_eq!(
            path_levels(" Jewelry & Watches > Watches >  Wristwatches "),
            vec!["wristwatches", "watches", "jewelry & watches"]
        );
        assert!(path_levels(" > ").is_empty());
    }

    #[test]
    fn exact_leaf_lookup_is_case_insensitive() {
        let taxonomy = MarketplaceTaxonomy::standard();
        assert_eq!(taxonomy.leaf_exact("Wristwatches"), Some(Chapter::WATCHES));
        assert_eq!(
            taxonomy.leaf_exact("Cell Phone Cases, Covers & Skins"),
            Some(Chapter::LEATHER_GOODS)
        );
        assert_eq!(taxonomy.leaf_exact("Nonexistent Leaf"), None);
    }

    #[test]
    fn partial_leaf_prefers_the_longest_key() {
        let taxonomy = MarketplaceTaxonomy::standard();
        let (key, chapter) = taxonomy.leaf_partial("Vintage Wall Clocks").expect("partial match");
        assert_eq!(key, "wall clocks");
        assert_eq!(chapter, Chapter::WATCHES);

        let (key, chapter) = taxonomy.leaf_partial("Vintage Car & Truck Parts").expect("partial match");
        assert_eq!(key, "car & truck parts");
        assert_eq!(chapter, Chapter::AUTOMOTIVE);
    }

    #[test]
    fn partial_leaf_matches_inside_compound_words() {
        let taxonomy = MarketplaceTaxonomy::standard();
        let (key, chapter) = taxonomy.leaf_partial("Smartwatches").expect("partial match");
        assert_eq!(key, "watches");
        assert_eq!(chapter, Chapter::WATCHES);
    }

    #[test]
    fn duplicate_leaf_names_collapse_to_one_entry() {
        let mut taxonomy = MarketplaceTaxonomy::default();
        taxonomy.insert_leaf("Clocks", Chapter::WATCHES);
        taxonomy.insert_leaf("clocks ", Chapter::FURNITURE);
        assert_eq!(taxonomy.leaf_count(), 1);
        assert_eq!(taxonomy.leaf_exact("clocks"), Some(Chapter::FURNITURE));
    }

    #[test]
    fn attribute_types_and_parents_resolve() {
        let taxonomy = MarketplaceTaxonomy::standard();
        assert_eq!(taxonomy.item_type(" Phone Case "), Some(Chapter::LEATHER_GOODS));
        assert_eq!(taxonomy.parent("eBay Motors"), Some(Chapter::AUTOMOTIVE));
        assert_eq!(taxonomy.validate(), Ok(()));
    }
}
