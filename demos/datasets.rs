use pathway::{Config, EnrichmentContext};

/// Lists all organizations and datasets of the configured data folder
fn main() {
    simple_logger::init_with_env().unwrap();

    let config = Config::from_env().expect("Invalid configuration");
    let context = EnrichmentContext::from_config(&config).expect("Unable to load pathway data");

    for organization in context.organizations().unwrap() {
        println!("{}", organization.name());
        for dataset in organization.datasets() {
            println!("\t{}\t{} pathways", dataset.name(), dataset.pathways());
        }
    }

    match context.genes() {
        Some(genes) => println!(
            "\nUniverse: {} genes ({} listed)",
            config.universe_size(),
            genes.count()
        ),
        None => println!("\nUniverse: {} genes (members unknown)", config.universe_size()),
    }
}
