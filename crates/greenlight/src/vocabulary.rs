//! Keyword vocabularies used by feature extraction.
//!
//! Every table is an ordered list of `(category, keywords)` pairs. For
//! single-valued dimensions the order IS the priority: the first category
//! with a keyword present in the text wins. Reordering a table changes
//! extraction results, and the tests pin the current order.
//!
//! Known overlaps (the same keyword in several categories, such as "escape"
//! in both the survival and freedom themes) are intentional for multi-valued
//! tables and resolved by table order for single-valued ones.

/// Ordered `(category, keywords)` table
pub type KeywordTable = &'static [(&'static str, &'static [&'static str])];

pub const PROTAGONIST_TYPES: KeywordTable = &[
  ("detective", &["detective", "investigator", "inspector", "sleuth", "cop", "sheriff", "private eye", "agent"]),
  ("soldier", &["soldier", "marine", "veteran", "warrior", "mercenary", "sniper", "commando", "knight"]),
  ("scientist", &["scientist", "researcher", "doctor", "surgeon", "engineer", "astronaut", "physicist", "biologist", "inventor", "hacker"]),
  ("criminal", &["thief", "con artist", "hitman", "assassin", "gangster", "smuggler", "criminal", "drug dealer", "robber", "outlaw", "mobster"]),
  ("parent", &["mother", "father", "mom", "dad", "parent", "widow", "widower", "stepmother"]),
  ("teenager", &["teen", "teenager", "high school", "student", "adolescent"]),
  ("child", &["child", "children", "kid", "boy", "girl", "orphan"]),
  ("artist", &["musician", "singer", "artist", "writer", "novelist", "painter", "actor", "actress", "dancer", "comedian", "chef", "rapper", "filmmaker"]),
  ("leader", &["president", "king", "queen", "ceo", "mogul", "senator", "ruler", "emperor", "boss", "heir", "heiress", "prince", "princess"]),
  ("outsider", &["outcast", "misfit", "loner", "immigrant", "stranger", "exile", "disgraced", "drifter", "refugee"]),
  ("everyperson", &["nurse", "teacher", "clerk", "employee", "worker", "waitress", "driver", "janitor", "accountant", "lawyer", "journalist", "reporter"]),
];

pub const CENTRAL_CONFLICTS: KeywordTable = &[
  ("survival", &["survive", "survival", "stranded", "trapped", "hunted", "escape", "outlast", "apocalypse", "shipwrecked"]),
  ("revenge", &["revenge", "vengeance", "avenge", "retribution", "payback"]),
  ("discovery", &["investigate", "investigation", "uncover", "discover", "mystery", "solve", "clue", "secret", "search for", "unravel"]),
  ("power", &["power", "throne", "empire", "takeover", "election", "dynasty", "control", "crown"]),
  ("love", &["love", "romance", "fall for", "relationship", "marriage", "wedding", "soulmate"]),
  ("identity", &["identity", "belong", "reinvent", "double life", "pretend", "disguise", "true self"]),
  ("justice", &["justice", "trial", "court", "wrongful", "wrongfully", "innocent", "corrupt", "corruption", "exonerate"]),
  ("freedom", &["freedom", "liberation", "rebel", "rebellion", "oppression", "prison", "break out", "enslaved"]),
  ("redemption", &["redemption", "redeem", "second chance", "atone", "forgiveness", "make amends"]),
];

pub const SETTINGS: KeywordTable = &[
  ("space", &["space", "spaceship", "starship", "planet", "galaxy", "orbit", "mars", "moon", "space station", "asteroid"]),
  ("small town", &["small town", "village", "rural", "farm", "hometown", "countryside", "township"]),
  ("suburbs", &["suburb", "suburban", "neighborhood", "cul de sac"]),
  ("city", &["city", "new york", "los angeles", "london", "paris", "tokyo", "urban", "metropolis", "downtown", "manhattan", "chicago"]),
  ("wilderness", &["wilderness", "forest", "woods", "mountain", "jungle", "desert", "island", "arctic", "ocean", "sea"]),
  ("school", &["school", "campus", "college", "university", "academy", "boarding school"]),
  ("workplace", &["office", "company", "corporation", "hospital", "newsroom", "restaurant", "kitchen", "law firm", "startup", "factory"]),
  ("historical", &["century", "medieval", "victorian", "1800s", "1920s", "1950s", "1960s", "1970s", "1980s", "world war", "civil war", "ancient", "renaissance", "wwii"]),
  ("fantasy realm", &["kingdom", "realm", "castle", "enchanted", "magical land", "underworld"]),
  ("dystopia", &["dystopian", "dystopia", "future", "post apocalyptic", "wasteland", "regime", "totalitarian"]),
  ("home", &["house", "home", "mansion", "apartment", "estate", "cabin"]),
];

pub const NARRATIVE_ARCHETYPES: KeywordTable = &[
  ("Overcoming the Monster", &["monster", "creature", "killer", "beast", "predator", "demon", "villain", "shark", "alien"]),
  ("Quest", &["quest", "journey", "mission", "search for", "expedition", "voyage", "treasure", "pilgrimage"]),
  ("Rags to Riches", &["rags", "riches", "fame", "fortune", "rise to", "poor", "dream of", "stardom", "penniless"]),
  ("Rebirth", &["redemption", "second chance", "transform", "reborn", "recover", "heal", "recovery", "sober"]),
  ("Voyage and Return", &["lost", "return home", "transported", "another world", "portal", "wakes up in", "stranded"]),
  ("Tragedy", &["downfall", "fall from grace", "ruin", "doomed", "obsession", "obsessed", "destroy", "spiral"]),
  ("Comedy", &["misunderstanding", "mix up", "hijinks", "mistaken identity", "wacky", "chaos", "farce"]),
];

/// Highest stakes first
pub const STAKES_LEVELS: KeywordTable = &[
  ("global", &["world", "humanity", "earth", "civilization", "mankind", "apocalypse", "everyone", "planet"]),
  ("societal", &["city", "country", "nation", "town", "community", "government", "society", "kingdom", "village", "people"]),
  ("personal", &["family", "life", "daughter", "son", "wife", "husband", "child", "career", "job", "marriage", "friend", "home", "reputation"]),
  ("internal", &["soul", "sanity", "identity", "self", "past", "guilt", "grief", "demons", "mind"]),
];

pub const STRUCTURE_TYPES: KeywordTable = &[
  ("nonlinear", &["flashback", "timeline", "time loop", "memories", "nonlinear", "past and present", "years later", "decades"]),
  ("ensemble", &["ensemble", "group of", "friends", "crew", "team", "strangers", "band of", "siblings", "families"]),
  ("countdown", &["before", "deadline", "hours", "race against", "countdown", "ticking", "until", "days to", "one night"]),
  ("episodic", &["season", "episode", "anthology", "case of the week", "each week"]),
];

pub const THEMES: KeywordTable = &[
  ("mortality", &["death", "die", "died", "dying", "murder", "kill", "mortality", "dead", "terminal", "grief"]),
  ("justice", &["justice", "injustice", "trial", "court", "lawyer", "wrongful", "corrupt", "corruption", "law", "verdict"]),
  ("family", &["family", "mother", "father", "daughter", "son", "sister", "brother", "parent", "siblings", "mom", "dad"]),
  ("identity", &["identity", "belong", "who she is", "who he is", "double life", "secret life", "true self"]),
  ("power", &["power", "control", "ambition", "empire", "throne", "greed", "dynasty"]),
  ("redemption", &["redemption", "redeem", "disgraced", "second chance", "atone", "forgive", "forgiveness", "fallen"]),
  ("love", &["love", "romance", "heart", "soulmate", "wedding", "marriage"]),
  ("survival", &["survive", "survival", "stranded", "trapped", "escape", "hunted"]),
  ("class", &["rich", "poor", "wealthy", "class", "working class", "billionaire", "servant", "elite", "poverty"]),
  ("technology", &["ai", "robot", "technology", "algorithm", "virtual", "digital", "android", "machine", "app", "social media"]),
  ("faith", &["faith", "god", "church", "cult", "belief", "occult", "ritual", "religion", "priest"]),
  ("coming of age", &["teen", "teenager", "growing up", "first love", "adolescence", "summer", "graduation", "high school"]),
  ("isolation", &["alone", "isolated", "lonely", "isolation", "remote", "solitude"]),
  ("friendship", &["friend", "friendship", "best friend", "bond", "buddy"]),
  ("freedom", &["freedom", "escape", "prison", "liberation", "rebel"]),
];

pub const GENRE_MARKERS: KeywordTable = &[
  ("crime", &["detective", "murder", "heist", "crime", "cop", "gangster", "police", "robbery", "mob", "cartel"]),
  ("horror", &["occult", "haunted", "demon", "ghost", "possessed", "monster", "creature", "terror", "slasher", "curse", "evil"]),
  ("sci-fi", &["space", "alien", "robot", "ai", "future", "time travel", "planet", "dystopian", "clone", "android"]),
  ("fantasy", &["magic", "dragon", "wizard", "kingdom", "spell", "witch", "enchanted", "sorcerer", "prophecy"]),
  ("romance", &["love", "romance", "fall for", "wedding", "relationship", "soulmate"]),
  ("comedy", &["hilarious", "comedy", "wacky", "awkward", "misadventure", "hijinks", "chaos"]),
  ("action", &["fight", "battle", "chase", "explosion", "mercenary", "assassin", "mission", "war"]),
  ("drama", &["grief", "struggle", "addiction", "illness", "divorce", "family", "loss"]),
  ("thriller", &["conspiracy", "killer", "stalker", "hunted", "race against", "kidnapped", "hostage", "deadly"]),
  ("mystery", &["mystery", "clue", "whodunit", "secret", "disappearance", "missing", "investigate"]),
  ("sports", &["team", "championship", "coach", "tournament", "boxer", "athlete", "league"]),
  ("musical", &["song", "sing", "music", "band", "musician", "concert", "singer"]),
  ("war", &["war", "soldier", "battlefield", "army", "platoon", "troops"]),
  ("western", &["cowboy", "frontier", "outlaw", "ranch", "sheriff", "gunslinger"]),
];

pub const STORY_BEATS: KeywordTable = &[
  ("inciting incident", &["when", "after", "discover", "find", "learn", "receive", "arrive", "inherit"]),
  ("call to adventure", &["must", "sets out", "embark", "recruited", "chosen", "summoned", "forced to"]),
  ("midpoint twist", &["but", "until", "twist", "reveal", "realize", "turns out", "only to"]),
  ("dark night", &["lose", "everything", "betrayal", "betrayed", "rock bottom", "shattered", "abandoned"]),
  ("climax", &["final", "showdown", "confront", "face", "battle", "before", "last chance"]),
  ("resolution", &["save", "restore", "reunite", "finally", "home", "make peace"]),
];

/// Number of distinct story beats a complete outline can cover
pub const STORY_BEAT_COUNT: usize = 6;

pub const TONES: KeywordTable = &[
  ("dark", &["dark", "disturbing", "grim", "brutal", "sinister", "bleak", "occult", "murder", "twisted"]),
  ("suspenseful", &["tense", "suspense", "race against", "hunted", "killer", "stalk", "deadline", "before", "trapped"]),
  ("comedic", &["funny", "hilarious", "comedic", "absurd", "quirky", "wacky", "awkward", "hijinks"]),
  ("heartwarming", &["heartwarming", "uplifting", "touching", "sweet", "warm", "feel good", "hope", "hopeful"]),
  ("epic", &["epic", "sweeping", "legendary", "vast", "war", "empire", "galaxy", "kingdom"]),
  ("romantic", &["romantic", "love", "passion", "longing", "fall for"]),
  ("satirical", &["satire", "satirical", "parody", "skewer", "send up"]),
  ("whimsical", &["whimsical", "magical", "fairy tale", "wonder", "enchanted"]),
  ("gritty", &["gritty", "raw", "street", "corrupt", "violent", "underworld", "drug"]),
  ("melancholic", &["melancholy", "grief", "loss", "bittersweet", "lonely", "mourning"]),
  ("inspirational", &["inspiring", "inspirational", "triumph", "overcome", "underdog", "against all odds"]),
];

/// Words that raise emotional intensity
pub const INTENSIFIERS: &[&str] = &[
  "must", "desperate", "desperately", "only", "never", "last", "everything", "forever", "final",
  "impossible", "all", "risk", "before", "again", "deadly", "race",
];

/// Floor for emotional intensity so a quiet logline never reads as zero
pub const MIN_INTENSITY: f64 = 0.1;

/// Audience segments, most specific first
pub const AUDIENCE_SEGMENTS: KeywordTable = &[
  ("families", &["family", "families", "all ages", "four quadrant"]),
  ("kids", &["kid", "kids", "children", "child", "preschool"]),
  ("teens", &["teen", "teens", "teenager", "adolescent"]),
  ("young adults", &["young adult", "ya", "18 34", "gen z", "millennial", "college"]),
  ("adults", &["adult", "adults", "mature", "grown up", "25 54", "18 49"]),
  ("general", &["general", "everyone", "broad", "mass market"]),
];

// -- Deep (layered pass) vocabulary ------------------------------------------

pub const DEEP_ARCHETYPES: KeywordTable = &[
  ("Redemption Arc", &["redemption", "redeem", "disgraced", "second chance", "atone", "make amends", "former", "fallen"]),
  ("Revenge Quest", &["revenge", "vengeance", "avenge", "payback"]),
  ("Fall from Grace", &["downfall", "fall from grace", "corrupted", "greed", "obsession", "spiral", "ruthless"]),
  ("Underdog Rise", &["underdog", "against all odds", "unlikely", "nobody", "rookie", "outmatched", "small time"]),
  ("Survival Ordeal", &["survive", "stranded", "trapped", "hunted", "escape", "outlast"]),
  ("Coming of Age", &["teen", "teenager", "growing up", "first love", "graduation", "adolescence", "summer"]),
  ("Forbidden Love", &["forbidden", "affair", "star crossed", "rival families", "secret romance"]),
  ("Mentor's Burden", &["mentor", "protege", "apprentice", "teach", "coach"]),
  ("Outsider's Acceptance", &["outcast", "misfit", "outsider", "immigrant", "stranger", "belong"]),
  ("Hero's Journey", &["chosen", "destiny", "quest", "journey", "called", "mission", "save the world"]),
];

pub const WOUNDS: KeywordTable = &[
  ("betrayal", &["betrayed", "betrayal", "framed", "double crossed", "backstab"]),
  ("guilt", &["guilt", "guilty", "disgraced", "blame", "mistake", "responsible for", "failed"]),
  ("loss", &["grief", "grieving", "widow", "widower", "death of", "lost", "mourning", "dead"]),
  ("abandonment", &["abandoned", "orphan", "left behind", "estranged", "absent father", "runaway"]),
  ("humiliation", &["humiliated", "ridiculed", "laughingstock", "fired", "rejected", "mocked"]),
  ("powerlessness", &["powerless", "helpless", "trapped", "oppressed", "enslaved", "captive"]),
  ("injustice", &["wrongful", "wrongfully", "injustice", "innocent", "discrimination"]),
];

pub const CONFLICT_TYPES: KeywordTable = &[
  ("Person vs Supernatural", &["ghost", "demon", "occult", "haunted", "curse", "possessed", "supernatural", "spirit", "witch"]),
  ("Person vs Technology", &["ai", "robot", "machine", "algorithm", "virus", "android", "technology", "computer"]),
  ("Person vs Nature", &["storm", "wilderness", "shark", "volcano", "ocean", "mountain", "stranded", "animal", "disaster", "creature"]),
  ("Person vs Society", &["society", "government", "regime", "system", "corrupt", "corruption", "class", "oppression", "law"]),
  ("Person vs Self", &["addiction", "guilt", "demons", "sanity", "memory", "grief", "identity", "doubt", "fear"]),
  ("Person vs Fate", &["prophecy", "destiny", "fate", "doomed", "time loop", "inevitable"]),
  ("Person vs Person", &["killer", "rival", "enemy", "villain", "nemesis", "hunt", "against", "murder"]),
];

pub const UNIVERSAL_TRUTHS: KeywordTable = &[
  ("The past cannot be outrun", &["past", "disgraced", "former", "history", "haunted", "again", "return"]),
  ("Justice has a cost", &["justice", "killer", "murder", "truth", "investigate", "corrupt"]),
  ("Love requires sacrifice", &["love", "sacrifice", "give up", "heart"]),
  ("Power corrupts", &["power", "greed", "empire", "control", "ambition"]),
  ("Family is what we choose", &["family", "found family", "adopt", "orphan", "bond", "siblings"]),
  ("Identity must be claimed", &["identity", "belong", "true self", "who she is", "who he is", "reinvent"]),
  ("Hope outlasts darkness", &["hope", "survive", "light", "despair", "rebuild"]),
  ("Fear reveals character", &["fear", "terror", "trapped", "hunted", "nightmare"]),
];

pub const CULTURAL_FLAGS: KeywordTable = &[
  ("technology anxiety", &["ai", "algorithm", "social media", "surveillance", "tech", "app", "robot", "virtual"]),
  ("economic inequality", &["rich", "poor", "billionaire", "class", "debt", "wealthy", "eviction", "poverty", "servant"]),
  ("climate anxiety", &["climate", "flood", "drought", "wildfire", "extinction", "pollution"]),
  ("institutional distrust", &["corrupt", "corruption", "cover up", "conspiracy", "government", "police", "system", "disgraced"]),
  ("identity and representation", &["immigrant", "identity", "queer", "heritage", "diaspora", "indigenous", "culture"]),
  ("mental health", &["anxiety", "depression", "therapy", "trauma", "addiction", "grief", "sanity"]),
  ("isolation and connection", &["lonely", "isolated", "isolation", "remote", "disconnected", "alone"]),
  ("true crime appetite", &["murder", "killer", "serial", "cold case", "investigate", "detective"]),
];

/// Protagonist traits that move the empathy score, with their point delta
pub const EMPATHY_TRAITS: &[(&str, i32, &[&str])] = &[
  ("family protector", 15, &["protect", "his family", "her family", "daughter", "son", "children", "family"]),
  ("underdog", 12, &["underdog", "unlikely", "nobody", "outmatched", "against all odds", "rookie", "struggling", "broke"]),
  ("sacrificial", 10, &["sacrifice", "gives up", "risk everything", "selfless"]),
  ("wounded", 10, &["grieving", "disgraced", "widow", "widower", "orphan", "haunted", "broken"]),
  ("villainous", -15, &["ruthless", "villain", "sadistic", "cruel", "murderous", "psychopath", "evil"]),
  ("selfish", -10, &["selfish", "arrogant", "greedy", "narcissistic", "entitled"]),
];

/// Symmetric "related category" pairs across every categorical vocabulary
pub const RELATED_CATEGORIES: &[(&str, &str)] = &[
  // Protagonists
  ("detective", "soldier"),
  ("detective", "everyperson"),
  ("criminal", "outsider"),
  ("parent", "everyperson"),
  ("teenager", "child"),
  ("artist", "outsider"),
  ("leader", "criminal"),
  ("scientist", "everyperson"),
  // Central conflicts
  ("survival", "freedom"),
  ("revenge", "justice"),
  ("discovery", "identity"),
  ("discovery", "justice"),
  ("power", "justice"),
  ("love", "identity"),
  ("redemption", "identity"),
  ("redemption", "justice"),
  // Settings
  ("small town", "suburbs"),
  ("small town", "wilderness"),
  ("city", "workplace"),
  ("suburbs", "home"),
  ("space", "dystopia"),
  ("historical", "fantasy realm"),
  ("school", "suburbs"),
  // Narrative archetypes
  ("Overcoming the Monster", "Quest"),
  ("Voyage and Return", "Quest"),
  ("Rebirth", "Tragedy"),
  ("Rags to Riches", "Rebirth"),
  // Stakes
  ("global", "societal"),
  ("societal", "personal"),
  ("personal", "internal"),
  // Structures
  ("ensemble", "episodic"),
  ("nonlinear", "episodic"),
  ("countdown", "nonlinear"),
  // Deep archetypes
  ("Redemption Arc", "Fall from Grace"),
  ("Redemption Arc", "Outsider's Acceptance"),
  ("Hero's Journey", "Coming of Age"),
  ("Hero's Journey", "Underdog Rise"),
  ("Hero's Journey", "Survival Ordeal"),
  ("Revenge Quest", "Fall from Grace"),
  ("Mentor's Burden", "Coming of Age"),
  // Wounds
  ("betrayal", "abandonment"),
  ("guilt", "loss"),
  ("humiliation", "injustice"),
  ("powerlessness", "injustice"),
  // Conflict types
  ("Person vs Nature", "Person vs Technology"),
  ("Person vs Nature", "Person vs Supernatural"),
  ("Person vs Technology", "Person vs Society"),
  ("Person vs Society", "Person vs Person"),
  ("Person vs Self", "Person vs Fate"),
  ("Person vs Supernatural", "Person vs Fate"),
  // Audience segments
  ("adults", "young adults"),
  ("teens", "young adults"),
  ("families", "kids"),
];

/// Whether two distinct categories are listed as related (order-insensitive)
pub fn are_related(a: &str, b: &str) -> bool {
  RELATED_CATEGORIES.iter().any(|(left, right)| {
    (left.eq_ignore_ascii_case(a) && right.eq_ignore_ascii_case(b))
      || (left.eq_ignore_ascii_case(b) && right.eq_ignore_ascii_case(a))
  })
}

/// Category names of a table, in priority order
pub fn categories(table: KeywordTable) -> Vec<&'static str> {
  table.iter().map(|(category, _)| *category).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_protagonist_priority_order_is_pinned() {
    assert_eq!(
      categories(PROTAGONIST_TYPES),
      vec![
        "detective", "soldier", "scientist", "criminal", "parent", "teenager", "child", "artist",
        "leader", "outsider", "everyperson"
      ]
    );
  }

  #[test]
  fn test_conflict_priority_order_is_pinned() {
    assert_eq!(
      categories(CENTRAL_CONFLICTS),
      vec![
        "survival", "revenge", "discovery", "power", "love", "identity", "justice", "freedom",
        "redemption"
      ]
    );
  }

  #[test]
  fn test_setting_priority_order_is_pinned() {
    assert_eq!(
      categories(SETTINGS),
      vec![
        "space", "small town", "suburbs", "city", "wilderness", "school", "workplace",
        "historical", "fantasy realm", "dystopia", "home"
      ]
    );
  }

  #[test]
  fn test_stakes_order_runs_highest_first() {
    assert_eq!(categories(STAKES_LEVELS), vec!["global", "societal", "personal", "internal"]);
  }

  #[test]
  fn test_narrative_archetype_order_is_pinned() {
    assert_eq!(
      categories(NARRATIVE_ARCHETYPES),
      vec![
        "Overcoming the Monster", "Quest", "Rags to Riches", "Rebirth", "Voyage and Return",
        "Tragedy", "Comedy"
      ]
    );
  }

  #[test]
  fn test_structure_order_is_pinned() {
    assert_eq!(categories(STRUCTURE_TYPES), vec!["nonlinear", "ensemble", "countdown", "episodic"]);
  }

  #[test]
  fn test_deep_archetype_order_is_pinned() {
    assert_eq!(
      categories(DEEP_ARCHETYPES),
      vec![
        "Redemption Arc", "Revenge Quest", "Fall from Grace", "Underdog Rise", "Survival Ordeal",
        "Coming of Age", "Forbidden Love", "Mentor's Burden", "Outsider's Acceptance",
        "Hero's Journey"
      ]
    );
  }

  #[test]
  fn test_wound_order_is_pinned() {
    assert_eq!(
      categories(WOUNDS),
      vec!["betrayal", "guilt", "loss", "abandonment", "humiliation", "powerlessness", "injustice"]
    );
  }

  #[test]
  fn test_conflict_type_order_is_pinned() {
    assert_eq!(
      categories(CONFLICT_TYPES),
      vec![
        "Person vs Supernatural", "Person vs Technology", "Person vs Nature", "Person vs Society",
        "Person vs Self", "Person vs Fate", "Person vs Person"
      ]
    );
  }

  #[test]
  fn test_related_is_symmetric() {
    assert!(are_related("Person vs Nature", "Person vs Technology"));
    assert!(are_related("Person vs Technology", "Person vs Nature"));
    assert!(are_related("SMALL TOWN", "suburbs"));
    assert!(!are_related("detective", "detective"));
    assert!(!are_related("space", "home"));
  }

  #[test]
  fn test_tables_have_no_empty_keyword_lists() {
    let tables = [
      PROTAGONIST_TYPES, CENTRAL_CONFLICTS, SETTINGS, NARRATIVE_ARCHETYPES, STAKES_LEVELS,
      STRUCTURE_TYPES, THEMES, GENRE_MARKERS, STORY_BEATS, TONES, AUDIENCE_SEGMENTS,
      DEEP_ARCHETYPES, WOUNDS, CONFLICT_TYPES, UNIVERSAL_TRUTHS, CULTURAL_FLAGS,
    ];
    for table in tables {
      for (category, keywords) in table {
        assert!(!category.is_empty());
        assert!(!keywords.is_empty(), "{category} has no keywords");
      }
    }
  }

  #[test]
  fn test_story_beat_count_matches_table() {
    assert_eq!(STORY_BEATS.len(), STORY_BEAT_COUNT);
  }
}
