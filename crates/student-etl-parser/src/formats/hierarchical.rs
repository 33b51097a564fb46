use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::ParserError;
use crate::model::StudentRecord;
use crate::registry::RecordReader;

use super::parse_measurement;

/// XML files whose root element holds one `<Entry>` per student, each with
/// `<Name>`, `<Height>` and `<Weight>` children.
pub struct HierarchicalReader;

impl Default for HierarchicalReader {
    fn default() -> Self {
        Self
    }
}

const ENTRY_TAG: &[u8] = b"Entry";
// Depths are counted from the root element at 1.
const ENTRY_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryField {
    Name,
    Height,
    Weight,
}

impl EntryField {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"Name" => Some(EntryField::Name),
            b"Height" => Some(EntryField::Height),
            b"Weight" => Some(EntryField::Weight),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct EntryBuilder {
    name: Option<String>,
    height: Option<String>,
    weight: Option<String>,
}

impl EntryBuilder {
    fn slot(&mut self, field: EntryField) -> &mut Option<String> {
        match field {
            EntryField::Name => &mut self.name,
            EntryField::Height => &mut self.height,
            EntryField::Weight => &mut self.weight,
        }
    }

    /// Returns false when the field was already seen; only the first
    /// occurrence of a child element counts.
    fn open(&mut self, field: EntryField) -> bool {
        let slot = self.slot(field);
        if slot.is_some() {
            return false;
        }
        *slot = Some(String::new());
        true
    }

    fn append(&mut self, field: EntryField, text: &str) {
        self.slot(field)
            .get_or_insert_with(String::new)
            .push_str(text);
    }

    fn finish(self, record: usize) -> Result<StudentRecord, ParserError> {
        let reader = HierarchicalReader::NAME;
        let missing = |field| ParserError::MissingField {
            reader,
            record,
            field,
        };

        let name = self.name.ok_or_else(|| missing("Name"))?;
        let height = self.height.ok_or_else(|| missing("Height"))?;
        let weight = self.weight.ok_or_else(|| missing("Weight"))?;

        Ok(StudentRecord {
            name,
            height: parse_measurement(reader, record, "Height", &height)?,
            weight: parse_measurement(reader, record, "Weight", &weight)?,
        })
    }
}

impl HierarchicalReader {
    const NAME: &'static str = "HIERARCHICAL";

    fn malformed(message: &str) -> ParserError {
        ParserError::Malformed {
            reader: Self::NAME,
            message: message.to_string(),
        }
    }
}

impl RecordReader for HierarchicalReader {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn extension(&self) -> &'static str {
        "xml"
    }

    fn parse(&self, content: &str) -> Result<Vec<StudentRecord>, ParserError> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(true);

        let mut records = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;
        let mut root_closed = false;
        let mut entry: Option<EntryBuilder> = None;
        let mut field: Option<EntryField> = None;
        let mut entry_count = 0usize;

        loop {
            let position = reader.buffer_position();
            let event = reader.read_event().map_err(|source| ParserError::Xml {
                reader: Self::NAME,
                position,
                source,
            })?;

            match event {
                Event::Start(element) => {
                    if root_closed {
                        return Err(Self::malformed("content after the root element"));
                    }
                    depth += 1;
                    saw_root = true;
                    let tag = element.name();
                    if depth == ENTRY_DEPTH && tag.as_ref() == ENTRY_TAG {
                        entry_count += 1;
                        entry = Some(EntryBuilder::default());
                    } else if depth == FIELD_DEPTH {
                        field = None;
                        if let (Some(builder), Some(kind)) =
                            (entry.as_mut(), EntryField::from_tag(tag.as_ref()))
                        {
                            if builder.open(kind) {
                                field = Some(kind);
                            }
                        }
                    }
                }
                Event::Empty(element) => {
                    if root_closed {
                        return Err(Self::malformed("content after the root element"));
                    }
                    saw_root = true;
                    let tag = element.name();
                    if depth == 0 {
                        root_closed = true;
                    } else if depth + 1 == ENTRY_DEPTH && tag.as_ref() == ENTRY_TAG {
                        entry_count += 1;
                        records.push(EntryBuilder::default().finish(entry_count)?);
                    } else if depth + 1 == FIELD_DEPTH {
                        if let (Some(builder), Some(kind)) =
                            (entry.as_mut(), EntryField::from_tag(tag.as_ref()))
                        {
                            builder.open(kind);
                        }
                    }
                }
                Event::Text(text) => {
                    // Whitespace is already trimmed away; anything left at the
                    // top level is stray text.
                    if depth == 0 {
                        return Err(Self::malformed("text outside the root element"));
                    }
                    if depth == FIELD_DEPTH {
                        if let (Some(builder), Some(kind)) = (entry.as_mut(), field) {
                            let value = text.unescape().map_err(|source| ParserError::Xml {
                                reader: Self::NAME,
                                position,
                                source,
                            })?;
                            builder.append(kind, &value);
                        }
                    }
                }
                Event::CData(data) => {
                    if depth == 0 {
                        return Err(Self::malformed("text outside the root element"));
                    }
                    if depth == FIELD_DEPTH {
                        if let (Some(builder), Some(kind)) = (entry.as_mut(), field) {
                            builder.append(kind, &String::from_utf8_lossy(&data));
                        }
                    }
                }
                Event::End(_) => {
                    if depth == ENTRY_DEPTH {
                        if let Some(builder) = entry.take() {
                            records.push(builder.finish(entry_count)?);
                        }
                    } else if depth == FIELD_DEPTH {
                        field = None;
                    }
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        root_closed = true;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(Self::malformed("document has no root element"));
        }
        if depth != 0 {
            return Err(Self::malformed(&format!(
                "document ended with {depth} unclosed element(s)"
            )));
        }

        Ok(records)
    }
}
