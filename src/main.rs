use bible_reader::bible::utils::parse_encoding;
use bible_reader::{BibleConfig, LoadStatus, Navigator, SourceSpec, VerseStore};
use std::env;
use std::sync::Arc;

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} [<korean.btx> <english.btx>] [--encoding-ko LABEL] [--encoding-en LABEL] \
         [--jump REF] [--next N] [--prev N] [--search QUERY]",
        program
    );
    eprintln!("Paths default to BIBLE_KO_PATH / BIBLE_EN_PATH.");
    std::process::exit(1);
}

fn flag_value<'a>(args: &'a [String], flag: &str, program: &str) -> Option<&'a str> {
    let idx = args.iter().position(|arg| arg == flag)?;
    match args.get(idx + 1) {
        Some(value) => Some(value.as_str()),
        None => {
            eprintln!("ERROR: {} flag requires an argument.", flag);
            usage(program)
        }
    }
}

fn count_flag(args: &[String], flag: &str, program: &str) -> usize {
    match flag_value(args, flag, program) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("ERROR: {} expects a number, got {:?}", flag, raw);
            usage(program)
        }),
        None => 0,
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("bible-reader");
    let mut config = BibleConfig::from_env();

    // Positional paths are the leading arguments that are not flags.
    let positional: Vec<&String> = args
        .iter()
        .skip(1)
        .take_while(|arg| !arg.starts_with("--"))
        .collect();
    match positional.as_slice() {
        [] => {}
        [korean, english] => {
            config.korean_source = Some(SourceSpec::new(korean.as_str()));
            config.english_source = Some(SourceSpec::new(english.as_str()));
        }
        _ => usage(program),
    }

    if let Some(label) = flag_value(&args, "--encoding-ko", program) {
        if let Some(source) = config.korean_source.as_mut() {
            source.encoding = parse_encoding(label);
        }
    }
    if let Some(label) = flag_value(&args, "--encoding-en", program) {
        if let Some(source) = config.english_source.as_mut() {
            source.encoding = parse_encoding(label);
        }
    }

    if config.korean_source.is_none() && config.english_source.is_none() {
        eprintln!("ERROR: no BTX sources given.");
        usage(program);
    }

    let store = Arc::new(VerseStore::from_config(&config));
    for report in store.load_sources(&config) {
        match &report.status {
            LoadStatus::Unavailable(e) => println!("  {}: {}", report.language, e),
            status => println!(
                "  {}: {:?}, {} verses, {} lines skipped",
                report.language,
                status,
                report.loaded,
                report.skipped.total()
            ),
        }
    }
    println!("{}", "=".repeat(60));

    if let Some(query) = flag_value(&args, "--search", program) {
        let results = store.search_verses(query, config.primary_language);
        println!("Search {:?}: {} results", query, results.len());
        for verse in &results {
            println!("  {} {}:{}  {}", verse.book, verse.chapter, verse.verse, verse.text);
        }
        println!("{}", "=".repeat(60));
    }

    let mut navigator = Navigator::from_config(Arc::clone(&store), &config);
    let target = flag_value(&args, "--jump", program).unwrap_or(config.start_reference.as_str());
    if let Err(e) = navigator.jump_to(target) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }

    for _ in 0..count_flag(&args, "--next", program) {
        if let Err(e) = navigator.next() {
            println!("  {}", e);
            break;
        }
    }
    for _ in 0..count_flag(&args, "--prev", program) {
        if let Err(e) = navigator.previous() {
            println!("  {}", e);
            break;
        }
    }

    if let Some(snapshot) = navigator.snapshot() {
        println!("{} {}:{}", snapshot.book, snapshot.chapter, snapshot.verse);
        println!("  {}", snapshot.primary_text);
        println!("  {}", snapshot.secondary_text);
    }
}
