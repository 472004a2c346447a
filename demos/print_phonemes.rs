use articulate::{DescriptorTable, ParserParms, parse_phonemes};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let input = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let input = if input.is_empty() {
        String::from("/HEHLOW , MAY NEYM IHZ SAEM.")
    } else {
        input
    };

    match parse_phonemes(&ParserParms::default(), DescriptorTable::standard(), &input) {
        Ok(buffer) => println!("{buffer}"),
        Err(err) => {
            eprintln!("{input:?}: {err}");
            std::process::exit(1);
        }
    }
}
