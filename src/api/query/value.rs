//! Typed values bound to statement placeholders

use crate::api::soap::xml::XmlWriter;
use chrono::{DateTime, Datelike, NaiveDate, Timelike};
use chrono_tz::Tz;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(DateTime<Tz>),
    TextSet(Vec<String>),
    NumberSet(Vec<i64>),
}

impl Value {
    /// Wire type name carried in `xsi:type`
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "TextValue",
            Value::Integer(_) | Value::Float(_) => "NumberValue",
            Value::Boolean(_) => "BooleanValue",
            Value::Date(_) => "DateValue",
            Value::DateTime(_) => "DateTimeValue",
            Value::TextSet(_) | Value::NumberSet(_) => "SetValue",
        }
    }

    /// Write as `<name xsi:type="...">...</name>`
    pub fn write_xml(&self, name: &str, w: &mut XmlWriter) {
        w.open_typed(name, self.type_name());
        match self {
            Value::Text(text) => w.text_element("value", text),
            Value::Integer(n) => w.text_element("value", &n.to_string()),
            Value::Float(n) => w.text_element("value", &n.to_string()),
            Value::Boolean(b) => w.text_element("value", if *b { "true" } else { "false" }),
            Value::Date(date) => {
                w.open("value");
                write_date(date, w);
                w.close("value");
            }
            Value::DateTime(date_time) => {
                w.open("value");
                w.open("date");
                write_date(&date_time.date_naive(), w);
                w.close("date");
                w.text_element("hour", &date_time.hour().to_string());
                w.text_element("minute", &date_time.minute().to_string());
                w.text_element("second", &date_time.second().to_string());
                w.text_element("timeZoneId", date_time.timezone().name());
                w.close("value");
            }
            Value::TextSet(items) => {
                for item in items {
                    Value::Text(item.clone()).write_xml("values", w);
                }
            }
            Value::NumberSet(items) => {
                for item in items {
                    Value::Integer(*item).write_xml("values", w);
                }
            }
        }
        w.close(name);
    }
}

fn write_date(date: &NaiveDate, w: &mut XmlWriter) {
    w.text_element("year", &date.year().to_string());
    w.text_element("month", &date.month().to_string());
    w.text_element("day", &date.day().to_string());
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Tz>> for Value {
    fn from(value: DateTime<Tz>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::TextSet(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::TextSet(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Value::NumberSet(value)
    }
}
