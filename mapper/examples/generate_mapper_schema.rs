use prefixed_attribute_mapper::config::PrefixedAttributeMapperConfig;

fn main() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(PrefixedAttributeMapperConfig);
    let path = "mapper/schema/mapper.json";
    {
        std::fs::create_dir_all("mapper/schema")?;
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &schema)?;
    }
    println!("Wrote schema to: {path}");

    Ok(())
}
