use log::info;
use rs_babble_core::io::read_corpus;
use rs_babble_core::{CommandParser, Generator, MarkovModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Read at most 10000 lines of the corpus; line breaks become sentence boundaries
    let corpus = read_corpus("./corpora/nursery.txt", Some(10_000))?;

    // The retry budget bounds how many sentences unconstrained speech may run for
    let model = MarkovModel::new(&corpus, 20)?;
    info!(
        "{} distinct tokens, {} line starts",
        model.transitions().len(),
        model.line_starts().len()
    );

    // Invalid inputs are rejected before any model exists
    match MarkovModel::new("", 20) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Empty corpus refused: {e}"),
    }
    match MarkovModel::new(&corpus, -1) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Negative budget refused: {e}"),
    }

    // A fixed seed makes every run print the same speech
    let mut generator = Generator::with_seed(model, 42);

    println!("Speech: {}", generator.generate_speech());
    println!("Ten words: {}", generator.generate_speech_with_num_words(10));
    println!("From 'mary': {}", generator.generate_speech_beginning_with_word("mary"));

    // Unknown first words are kept, and followed by a random corpus word
    println!(
        "From 'dragon', eight words: {}",
        generator.generate_speech_beginning_with_word_and_with_num_words("dragon", 8)
    );

    // Chat-style invocations go through the same four modes
    let parser = CommandParser::new("babble", "!");
    for message in ["!babble", "!babble 12", "!babble Lamb", "!babble the 6", "!babble 6 the"] {
        match parser.parse(message) {
            Some(Ok(request)) => println!("{message} -> {}", generator.respond(&request)),
            Some(Err(e)) => println!("{message} -> {e}"),
            None => println!("{message} -> (ignored)"),
        }
    }

    Ok(())
}
