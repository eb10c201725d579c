use homeassistant_discovery::connector::ConnectorOptions;
use homeassistant_discovery::edgetpu::EdgeTpuOptions;

fn main() -> anyhow::Result<()> {
    std::fs::create_dir_all("schema")?;

    for (path, schema) in [
        ("schema/connector.json", schemars::schema_for!(ConnectorOptions)),
        ("schema/edgetpu.json", schemars::schema_for!(EdgeTpuOptions)),
    ] {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &schema)?;

        println!("Wrote schema to: {path}");
    }

    Ok(())
}
