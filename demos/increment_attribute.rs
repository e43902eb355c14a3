use std::io;

use xmlproc::mappers::{NamespaceNormalizer, Pruner};
use xmlproc::{Error, Event, Mapped, Mapper, Parameters, Processor, Reader, Writer};

const EXAMPLE: &str = r#"<taxii_11:Discovery_Response
  xmlns:taxii="http://taxii.mitre.org/messages/taxii_xml_binding-1"
  xmlns:taxii_11="http://taxii.mitre.org/messages/taxii_xml_binding-1.1"
  xmlns:tdq="http://taxii.mitre.org/query/taxii_default_query-1"
  message_id="32898"
  in_response_to="1">
</taxii_11:Discovery_Response>"#;

// Sets `in_response_to` on the discovery response.
struct IncInResponseTo;

impl Mapper for IncInResponseTo {
    fn map(&mut self, mut event: Event) -> Result<Mapped, Error> {
        if let Event::StartElement(element) = &mut event {
            if element.name.local() == "Discovery_Response" {
                if let Some(value) = element.attribute_mut("in_response_to") {
                    *value = "2".to_string();
                }
            }
        }
        Ok(Mapped::Keep(event))
    }
}

fn main() -> Result<(), Error> {
    let mut processor = Processor::new();
    processor.add_mapper(Pruner);
    processor.add_mapper(IncInResponseTo);
    processor.add_mapper(NamespaceNormalizer::new());

    let mut writer = Writer::with_parameters(io::stdout(), Parameters::indented());
    processor.process(Reader::new(EXAMPLE), &mut writer)?;
    writer.flush()?;
    println!();
    Ok(())
}
