use crate::domain::chapter::Chapter;
use crate::domain::rule::ClassificationRule;

fn rule(
    chapter: u8,
    codes: [&str; 3],
    category: &str,
    material: &str,
    usage: &str,
    keywords: &[&str],
    reason: &str,
) -> ClassificationRule {
    ClassificationRule::new(Chapter::of(chapter), codes, category, material, usage, keywords, reason)
}

/// Built-in rule corpus. Order matters only as the tie-breaker between equal scores.
pub fn standard_rules() -> Vec<ClassificationRule> {
    vec![
        // Knitted apparel
        rule(
            61,
            ["6109.10", "6109.10.0012", "6109.10.900"],
            "Apparel (knitted)",
            "Cotton / polyester",
            "Everyday wear",
            &["t-shirt", "cotton t-shirt", "tshirt", "t shirt", "tee", "singlet", "cotton"],
            "T-shirts and singlets of cotton, knitted or crocheted. HTS stat suffix 12 covers \
             men's cotton; synthetic fibres fall under 6109.90.",
        ),
        rule(
            61,
            ["6110.20", "6110.20.2075", "6110.20.000"],
            "Apparel (knitwear)",
            "Cotton / wool / acrylic",
            "Everyday wear, warmth",
            &["sweater", "knit", "pullover", "cardigan", "hoodie", "sweatshirt", "vest", "cotton"],
            "Jerseys, pullovers and cardigans, knitted. Cotton is 6110.20, wool 6110.11, \
             man-made fibres 6110.30.",
        ),
        rule(
            61,
            ["6108.21", "6108.21.0010", "6108.21.000"],
            "Apparel (underwear)",
            "Cotton / nylon",
            "Worn as underwear",
            &["underwear", "lingerie", "bra", "panty", "boxer", "brief", "cotton"],
            "Briefs and panties, knitted. Cotton is 6108.21, man-made fibres 6108.22; men's \
             underwear belongs to 6107.",
        ),
        rule(
            61,
            ["6115.95", "6115.95.9010", "6115.95.000"],
            "Apparel (hosiery)",
            "Cotton / nylon",
            "Worn on the feet",
            &["socks", "stocking", "tights", "cotton"],
            "Hosiery, knitted. Cotton is 6115.95, synthetic fibres 6115.96, pantyhose \
             6115.21/22.",
        ),
        rule(
            61,
            ["6112.41", "6112.41.0010", "6112.41.000"],
            "Apparel (swimwear)",
            "Nylon / polyester",
            "Swimming, leisure",
            &["swimwear", "swimsuit", "bikini", "swim"],
            "Women's swimwear of synthetic fibres, knitted.",
        ),
        // Woven apparel
        rule(
            62,
            ["6205.20", "6205.20.2016", "6205.20.000"],
            "Apparel (woven)",
            "Cotton / polyester / blends",
            "Everyday and business wear",
            &["shirt", "blouse", "dress shirt", "cotton"],
            "Men's shirts of cotton, not knitted. Knitted shirts fall under 6105.",
        ),
        rule(
            62,
            ["6201.40", "6201.40.2010", "6201.40.000"],
            "Apparel (outerwear)",
            "Cotton / wool / synthetics",
            "Outdoor wear, warmth",
            &["jacket", "blazer", "coat", "anorak", "windbreaker", "parka"],
            "Men's overcoats, anoraks and similar of man-made fibres, not knitted.",
        ),
        rule(
            62,
            ["6204.43", "6204.43.4020", "6204.43.000"],
            "Apparel (women's)",
            "Polyester / cotton",
            "Everyday and formal wear",
            &["dress", "one-piece", "gown"],
            "Women's dresses of synthetic fibres, not knitted.",
        ),
        rule(
            62,
            ["6203.42", "6203.42.4011", "6203.42.000"],
            "Apparel (bottoms)",
            "Cotton / denim",
            "Everyday wear",
            &["pants", "trousers", "jeans", "denim", "chinos", "slacks"],
            "Men's trousers of cotton, not knitted. Denim jeans are included here.",
        ),
        rule(
            62,
            ["6204.52", "6204.52.2060", "6204.52.000"],
            "Apparel (women's bottoms)",
            "Polyester / cotton",
            "Everyday wear",
            &["skirt"],
            "Women's skirts of cotton, not knitted.",
        ),
        // Bags and cases
        rule(
            42,
            ["4202.21", "4202.21.6000", "4202.21.000"],
            "Bags",
            "Leather / synthetic leather / nylon",
            "Carrying, storage",
            &["bag", "handbag", "tote", "shoulder bag", "crossbody"],
            "Handbags with outer surface of leather. Plastic or textile surfaces fall under \
             4202.22.",
        ),
        rule(
            42,
            ["4202.31", "4202.31.6000", "4202.31.000"],
            "Small leather goods",
            "Leather / synthetic leather",
            "Holding money and cards",
            &["wallet", "purse", "card holder"],
            "Articles normally carried in the pocket or handbag, outer surface of leather.",
        ),
        rule(
            42,
            ["4202.92", "4202.92.3031", "4202.92.000"],
            "Bags (backpacks)",
            "Nylon / polyester",
            "Carrying, commuting",
            &["backpack", "rucksack", "daypack"],
            "Backpacks with outer surface of textile or plastic sheeting.",
        ),
        rule(
            42,
            ["4202.12", "4202.12.8070", "4202.12.000"],
            "Travel goods",
            "Plastic / metal",
            "Travel",
            &["suitcase", "luggage", "carry-on", "trolley case"],
            "Trunks, suitcases and similar containers with outer surface of plastics or textile.",
        ),
        rule(
            42,
            ["4202.99", "4202.99.9000", "4202.99.000"],
            "Cases and covers",
            "Plastic / silicone / leather",
            "Protecting devices",
            &["phone case", "case", "cover", "iphone case"],
            "Cases and containers not elsewhere specified, including cases for phones and \
             other devices.",
        ),
        // Footwear
        rule(
            64,
            ["6404.11", "6404.11.9020", "6404.11.000"],
            "Footwear",
            "Rubber / synthetics / textile",
            "Walking, sport",
            &[
                "shoes",
                "sneakers",
                "sneaker",
                "footwear",
                "boots",
                "sandals",
                "running shoes",
                "air max",
                "ultraboost",
                "jordan",
                "yeezy",
                "dunk",
                "chuck taylor",
                "all star",
                "rs-x",
                "gel-",
                "574",
                "990",
                "993",
                "2002r",
                "air force",
                "stan smith",
                "superstar",
                "old skool",
                "classic leather",
                "club c",
                "suede",
                "new balance",
                "asics",
                "skechers",
                "crocs",
                "birkenstock",
                "timberland",
                "dr. martens",
                "ugg",
            ],
            "Sports and casual footwear with outer soles of rubber or plastics and uppers of \
             textile.",
        ),
        rule(
            64,
            ["6403.59", "6403.59.9060", "6403.59.000"],
            "Footwear (leather)",
            "Leather",
            "Business, formal",
            &["leather shoes", "loafer", "oxford", "pumps", "dress shoes"],
            "Footwear with outer soles and uppers of leather.",
        ),
        // Electronics and computers
        rule(
            85,
            ["8517.13", "8517.13.0000", "8517.13.000"],
            "Electronics (telecom)",
            "Electronic components / glass / metal",
            "Communication",
            &["phone", "smartphone", "mobile", "iphone", "android", "galaxy", "pixel"],
            "Smartphones for cellular networks.",
        ),
        rule(
            85,
            ["8518.30", "8518.30.2000", "8518.30.900"],
            "Electronics (audio)",
            "Plastic / metal",
            "Audio playback",
            &["earphone", "headphone", "earbuds", "airpods", "headset"],
            "Headphones and earphones, whether or not combined with a microphone.",
        ),
        rule(
            84,
            ["8471.30", "8471.30.0100", "8471.30.000"],
            "Electronics (computers)",
            "Electronic components / metal / plastic",
            "Data processing",
            &["laptop", "notebook pc", "macbook", "chromebook"],
            "Portable automatic data processing machines weighing not more than 10 kg.",
        ),
        rule(
            84,
            ["8471.30", "8471.30.0100", "8471.30.000"],
            "Electronics (tablets)",
            "Electronic components / glass / metal",
            "Data processing, reading",
            &["tablet", "ipad"],
            "Tablets are portable data processing machines of 8471.30.",
        ),
        rule(
            85,
            ["8525.81", "8525.81.0040", "8525.81.000"],
            "Electronics (imaging)",
            "Metal / glass / electronic components",
            "Photography",
            &["camera", "digital camera", "camcorder"],
            "Digital cameras and video camera recorders.",
        ),
        rule(
            85,
            ["8504.40", "8504.40.8500", "8504.40.900"],
            "Electronics (power)",
            "Plastic / metal",
            "Charging, power supply",
            &["charger", "adapter", "power supply"],
            "Static converters, including chargers and power adapters.",
        ),
        rule(
            85,
            ["8507.60", "8507.60.0090", "8507.60.000"],
            "Electronics (batteries)",
            "Lithium / metal",
            "Energy storage",
            &["battery", "lithium", "power bank"],
            "Lithium-ion accumulators.",
        ),
        rule(
            85,
            ["8518.22", "8518.22.0000", "8518.22.000"],
            "Electronics (audio)",
            "Plastic / metal",
            "Audio playback",
            &["speaker", "bluetooth speaker", "soundbar"],
            "Multiple loudspeakers mounted in the same enclosure.",
        ),
        // Jewelry and watches
        rule(
            71,
            ["7117.19", "7117.19.9000", "7117.19.000"],
            "Jewelry",
            "Precious metal / stones / alloy",
            "Adornment",
            &["jewelry", "necklace", "ring", "bracelet", "earring", "pendant"],
            "Imitation jewelry of base metal. Precious metal jewelry is 7113.",
        ),
        rule(
            91,
            ["9102.12", "9102.12.8040", "9102.12.000"],
            "Watches",
            "Metal / glass / plastic",
            "Timekeeping, adornment",
            &["watch", "wristwatch", "smartwatch", "chronograph"],
            "Wrist-watches, electrically operated, with opto-electronic display.",
        ),
        // Toys and sports
        rule(
            95,
            ["9503.00", "9503.00.0080", "9503.00.000"],
            "Toys",
            "Plastic / fabric / metal",
            "Play, collecting",
            &["toy", "stuffed", "plush", "figure", "doll", "lego"],
            "Toys, dolls, puzzles and scale models.",
        ),
        rule(
            95,
            ["9506.91", "9506.91.0030", "9506.91.000"],
            "Sporting goods",
            "Metal / carbon / rubber",
            "Sport, exercise",
            &["golf", "tennis", "racket", "sports equipment", "training", "dumbbell", "yoga"],
            "Articles and equipment for general physical exercise and gymnastics.",
        ),
        // Furniture and lighting
        rule(
            94,
            ["9401.61", "9401.61.6011", "9401.61.000"],
            "Furniture (seating)",
            "Wood / metal / fabric",
            "Seating",
            &["chair", "sofa", "stool", "armchair"],
            "Upholstered seats with wooden frames.",
        ),
        rule(
            94,
            ["9403.60", "9403.60.8081", "9403.60.000"],
            "Furniture (tables)",
            "Wood / metal",
            "Work, dining",
            &["table", "desk"],
            "Other wooden furniture.",
        ),
        rule(
            94,
            ["9404.21", "9404.21.0010", "9404.21.000"],
            "Furniture (bedding)",
            "Wood / metal / foam",
            "Sleeping",
            &["bed", "mattress", "futon"],
            "Mattresses of cellular rubber or plastics.",
        ),
        rule(
            94,
            ["9405.11", "9405.11.4010", "9405.11.000"],
            "Lighting",
            "Metal / glass / plastic",
            "Illumination",
            &["lamp", "light", "chandelier", "led"],
            "Chandeliers and other electric ceiling or wall lighting fittings for LED sources.",
        ),
        // Cosmetics and toiletries
        rule(
            33,
            ["3304.10", "3304.10.0000", "3304.10.000"],
            "Cosmetics",
            "Chemical base / pigments",
            "Make-up",
            &["cosmetics", "makeup", "foundation", "lipstick", "eyeshadow", "mascara"],
            "Lip make-up preparations and other beauty or make-up preparations.",
        ),
        rule(
            33,
            ["3303.00", "3303.00.3000", "3303.00.000"],
            "Fragrance",
            "Alcohol / aromatics",
            "Scenting",
            &[
                "perfume",
                "fragrance",
                "cologne",
                "eau de toilette",
                "eau de parfum",
                "parfum",
                "edp",
                "edt",
            ],
            "Perfumes and toilet waters.",
        ),
        rule(
            33,
            ["3304.99", "3304.99.5000", "3304.99.900"],
            "Skin care",
            "Chemical base / botanical extracts",
            "Skin care",
            &["skincare", "skin care", "cream", "lotion", "serum", "moisturizer", "sunscreen"],
            "Preparations for the care of the skin, including sunscreen.",
        ),
        rule(
            33,
            ["3305.10", "3305.10.0000", "3305.10.000"],
            "Hair care",
            "Surfactants / chemical base",
            "Hair care",
            &["shampoo", "conditioner", "hair care", "hair oil", "treatment"],
            "Shampoos and other preparations for use on the hair.",
        ),
        rule(
            34,
            ["3401.30", "3401.30.5000", "3401.30.000"],
            "Soap and cleansers",
            "Surfactants / oils",
            "Washing",
            &["soap", "hand wash", "body wash"],
            "Organic surface-active products for washing the skin, in liquid form.",
        ),
        rule(
            34,
            ["3406.00", "3406.00.0000", "3406.00.000"],
            "Candles",
            "Wax / paraffin",
            "Lighting, scent",
            &["candle"],
            "Candles, tapers and the like.",
        ),
        // Housewares
        rule(
            39,
            ["3924.10", "3924.10.4000", "3924.10.000"],
            "Plastic housewares",
            "Plastic",
            "Food storage",
            &["plastic container", "food container", "lunch box"],
            "Tableware and kitchenware of plastics.",
        ),
        rule(
            73,
            ["7323.93", "7323.93.0045", "7323.93.000"],
            "Metal containers",
            "Stainless steel",
            "Carrying drinks, insulation",
            &["stainless", "tumbler", "flask", "thermos"],
            "Table, kitchen or other household articles of stainless steel.",
        ),
        rule(
            63,
            ["6302.60", "6302.60.0020", "6302.60.000"],
            "Textiles (towels)",
            "Cotton",
            "Drying",
            &["towel", "cotton"],
            "Toilet and kitchen linen of terry towelling, of cotton.",
        ),
        rule(
            63,
            ["6301.40", "6301.40.0020", "6301.40.000"],
            "Textiles (blankets)",
            "Polyester / wool",
            "Bedding, warmth",
            &["blanket", "throw"],
            "Blankets and travelling rugs of synthetic fibres.",
        ),
        rule(
            69,
            ["6912.00", "6912.00.4500", "6912.00.000"],
            "Ceramics",
            "Porcelain / earthenware",
            "Dining, decoration",
            &["ceramic", "cup", "mug", "pottery", "plate", "bowl"],
            "Ceramic tableware and kitchenware, other than porcelain or china.",
        ),
        rule(
            49,
            ["4901.99", "4901.99.0092", "4901.99.000"],
            "Books and printed matter",
            "Paper",
            "Reading",
            &["book", "manga", "comic", "magazine"],
            "Printed books, brochures and similar printed matter.",
        ),
        // Food
        rule(
            9,
            ["0901.21", "0901.21.0045", "0901.21.000"],
            "Coffee",
            "Coffee beans",
            "Beverage",
            &["coffee", "espresso"],
            "Roasted coffee, not decaffeinated.",
        ),
        rule(
            9,
            ["0902.10", "0902.10.1010", "0902.10.900"],
            "Tea",
            "Tea leaves",
            "Beverage",
            &["tea", "green tea", "black tea", "matcha"],
            "Green tea in immediate packings of a content not exceeding 3 kg.",
        ),
        rule(
            18,
            ["1806.31", "1806.31.0040", "1806.31.000"],
            "Chocolate",
            "Cacao / sugar",
            "Food",
            &["chocolate", "cacao", "cocoa"],
            "Chocolate in blocks or bars, filled.",
        ),
        rule(
            21,
            ["2106.90", "2106.90.9998", "2106.90.300"],
            "Dietary supplements",
            "Nutrients",
            "Health maintenance",
            &["supplement", "vitamin", "protein"],
            "Food preparations not elsewhere specified, including dietary supplements.",
        ),
        // Headgear and accessories
        rule(
            65,
            ["6505.00", "6505.00.8015", "6505.00.000"],
            "Headgear",
            "Cotton / polyester / wool",
            "Headwear",
            &["hat", "cap", "beret", "beanie"],
            "Hats and other headgear, knitted or made up from textile.",
        ),
        rule(
            66,
            ["6601.99", "6601.99.0000", "6601.99.000"],
            "Umbrellas",
            "Metal / polyester",
            "Rain and sun protection",
            &["umbrella", "parasol"],
            "Umbrellas and sun umbrellas.",
        ),
        rule(
            90,
            ["9004.10", "9004.10.0000", "9004.10.000"],
            "Eyewear",
            "Plastic / glass / metal",
            "Vision, sun protection",
            &["glasses", "sunglasses", "eyeglasses"],
            "Sunglasses and spectacles.",
        ),
        // Automotive
        rule(
            87,
            ["8708.99", "8708.99.8180", "8708.99.900"],
            "Automotive parts",
            "Metal / rubber",
            "Vehicle maintenance",
            &[
                "car parts",
                "auto parts",
                "tire",
                "wheel",
                "engine",
                "oil cap",
                "radiator",
                "brake",
                "spark plug",
                "bumper",
                "headlight",
                "alternator",
                "gasket",
                "exhaust",
                "muffler",
            ],
            "Parts and accessories of motor vehicles not elsewhere specified in 8708.",
        ),
        // Wood, paper, tools
        rule(
            44,
            ["4419.19", "4419.19.0000", "4419.19.090"],
            "Wooden articles",
            "Wood",
            "Household, cooking",
            &["wooden", "cutting board", "wood"],
            "Tableware and kitchenware of wood.",
        ),
        rule(
            48,
            ["4820.10", "4820.10.2020", "4820.10.000"],
            "Paper products",
            "Paper / pulp",
            "Writing, hygiene",
            &["paper", "notebook", "envelope", "tissue", "toilet paper"],
            "Registers, notebooks, diaries and similar articles of paper.",
        ),
        rule(
            82,
            ["8211.91", "8211.91.8060", "8211.91.000"],
            "Tools and blades",
            "Steel / stainless steel",
            "Cutting, work",
            &["knife", "kitchen knife", "scissors", "tool", "screwdriver", "wrench"],
            "Knives with fixed blades and other hand tools of base metal.",
        ),
        rule(
            96,
            ["9603.21", "9603.21.0000", "9603.21.000"],
            "Brushes",
            "Plastic / nylon",
            "Cleaning, hygiene",
            &["toothbrush", "brush"],
            "Toothbrushes and other brushes.",
        ),
        rule(
            96,
            ["9608.10", "9608.10.0000", "9608.10.900"],
            "Writing instruments",
            "Plastic / metal",
            "Writing",
            &["pen", "ballpoint", "fountain pen", "pencil", "marker"],
            "Ball point pens and other writing instruments.",
        ),
        // Musical instruments
        rule(
            92,
            ["9202.90", "9202.90.2000", "9202.90.000"],
            "String instruments",
            "Wood / metal strings",
            "Performance",
            &[
                "guitar",
                "bass guitar",
                "acoustic guitar",
                "electric guitar",
                "ukulele",
                "banjo",
                "mandolin",
            ],
            "Guitars and other plucked string instruments.",
        ),
        rule(
            92,
            ["9201.10", "9201.10.0000", "9201.10.000"],
            "Keyboard instruments",
            "Wood / metal / plastic",
            "Performance",
            &["piano", "keyboard", "organ", "synthesizer", "accordion"],
            "Pianos and other keyboard instruments.",
        ),
        rule(
            92,
            ["9206.00", "9206.00.4000", "9206.00.000"],
            "Percussion instruments",
            "Wood / metal / hide",
            "Performance",
            &["drum", "percussion", "cymbal", "snare", "tambourine", "cajon"],
            "Percussion musical instruments.",
        ),
        rule(
            92,
            ["9205.90", "9205.90.4000", "9205.90.000"],
            "Wind and bowed instruments",
            "Metal / wood",
            "Performance",
            &[
                "trumpet",
                "saxophone",
                "flute",
                "clarinet",
                "trombone",
                "harmonica",
                "violin",
                "cello",
                "viola",
            ],
            "Wind musical instruments. Bowed string instruments are grouped here as well.",
        ),
        rule(
            57,
            ["5703.30", "5703.30.2010", "5703.30.000"],
            "Rugs and floor coverings",
            "Wool / synthetics / cotton",
            "Floor covering, decoration",
            &[
                "rug",
                "carpet",
                "area rug",
                "runner",
                "mat",
                "persian rug",
                "kilim",
                "tapestry",
            ],
            "Tufted carpets and other textile floor coverings of man-made materials.",
        ),
        rule(
            88,
            ["8806.10", "8806.10.0000", "8806.10.000"],
            "Unmanned aircraft",
            "Plastic / carbon / metal",
            "Aerial photography, racing, industry",
            &[
                "drone",
                "quadcopter",
                "uav",
                "unmanned aerial",
                "camera drone",
                "racing drone",
                "fpv drone",
            ],
            "Unmanned aircraft designed for the carriage of passengers excluded; consumer \
             drones fall here.",
        ),
        rule(
            30,
            ["3004.90", "3004.90.9290", "3004.90.000"],
            "Medicaments and supplements",
            "Chemical / natural ingredients",
            "Treatment, health maintenance",
            &["medicine", "pharmaceutical", "tablet", "capsule", "supplement", "vitamin"],
            "Medicaments put up in measured doses. Vitamin products compete with 2106.90 and \
             are settled by score.",
        ),
        rule(
            97,
            ["9701.10", "9701.10.0000", "9701.10.000"],
            "Works of art and collectibles",
            "Canvas / wood / stone / metal",
            "Display, collecting",
            &[
                "painting",
                "oil painting",
                "watercolor",
                "art print",
                "lithograph",
                "sculpture",
                "antique",
                "collectible",
            ],
            "Paintings, drawings and pastels executed entirely by hand.",
        ),
    ]
}
