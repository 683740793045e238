//! Print what the admin console shows for the mapper, and run it once against a sample login.

use clap::Parser;
use identity_broker::{
    context::BrokeredIdentityContext,
    mapper::{IdentityProviderMapper, MapperDescriptor},
    session::{Realm, Session},
};
use prefixed_attribute_mapper::{config::MapperConfigArguments, PrefixedUserAttributeMapper};

#[derive(Debug, Parser)]
struct Cli {
    #[command(flatten)]
    mapper: MapperConfigArguments,

    /// User info document to import from, as JSON
    #[arg(long = "user-info", default_value = r#"{"address": {"locality": "Paris"}}"#)]
    user_info: String,
}

fn main() -> anyhow::Result<()> {
    let _ = env_logger::try_init();
    let cli = Cli::parse();

    let mapper = PrefixedUserAttributeMapper;
    println!("{}", serde_json::to_string_pretty(&MapperDescriptor::of(&mapper))?);

    let model = cli.mapper.into_model()?;
    let mut context = BrokeredIdentityContext::new("sample")
        .with_identity_provider_alias(model.identity_provider_alias.clone())
        .with_user_info(serde_json::from_str(&cli.user_info)?);

    mapper.preprocess_federated_identity(&Session::default(), &Realm::new("sample"), &model, &mut context)?;

    println!("email: {:?}", context.email());
    println!("first name: {:?}", context.first_name());
    println!("last name: {:?}", context.last_name());
    println!("attributes: {:?}", context.attributes());

    Ok(())
}
