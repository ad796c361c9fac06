// Web-Modul: eingebettetes Dashboard
//
// Das JSON-Protokoll selbst liegt in helmet_core::protocol, damit es
// auf dem Host getestet werden kann.

// HTML-Datei zur Compile-Zeit einbinden
// Die Datei wird direkt ins Binary eingebettet
pub const INDEX_HTML: &str = include_str!("index.html");
