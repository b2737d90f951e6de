//! Embedded HTML pages.
//!
//! No template engine: pages are small, rendered with `format!` around a
//! shared shell. Anything user-supplied is escaped before it lands in
//! markup.

use irrigo_core::{PredictionRecord, PumpStatus, SensorReading, SoilType};

const STYLE: &str = "\
body { font: 16px/1.4 system-ui, sans-serif; margin: 0 auto; max-width: 720px; padding: 16px; }\n\
h1 { font-weight: 600; margin: 0 0 12px; }\n\
form { display: grid; gap: 8px; max-width: 360px; }\n\
table { border-collapse: collapse; }\n\
td, th { border: 1px solid #999; padding: 4px 10px; }\n\
.notice { padding: 8px 12px; background: #eef; border-radius: 6px; }\n\
nav a { margin-right: 12px; }\n";

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
         <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a><a href=\"/sensor_data\">Sensors</a>\
         <a href=\"/seedBank\">Seed Banks</a><a href=\"/contact\">Contact</a></nav>\n\
         {body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn notice(message: Option<&str>) -> String {
    match message {
        Some(m) => format!("<p class=\"notice\">{}</p>\n", escape(m)),
        None => String::new(),
    }
}

pub fn index_page(message: Option<&str>, history: &[PredictionRecord]) -> String {
    let mut body = String::from("<h1>Crop Recommendation</h1>\n");
    body.push_str(&notice(message));
    body.push_str("<form method=\"post\" action=\"/predict\">\n");
    for (name, label) in [
        ("N", "Nitrogen (N)"),
        ("P", "Phosphorus (P)"),
        ("K", "Potassium (K)"),
        ("temperature", "Temperature (°C)"),
        ("humidity", "Humidity (%)"),
        ("ph", "Soil pH"),
        ("rainfall", "Rainfall (mm)"),
    ] {
        body.push_str(&format!(
            "<label>{label} <input name=\"{name}\" required></label>\n"
        ));
    }
    body.push_str("<label>Soil type <select name=\"soil_type\">\n");
    for soil in SoilType::ALL {
        body.push_str(&format!("<option value=\"{soil}\">{soil}</option>\n"));
    }
    body.push_str("</select></label>\n<button type=\"submit\">Predict</button>\n</form>\n");

    if !history.is_empty() {
        body.push_str("<h2>Recent predictions</h2>\n<ul>\n");
        for record in history {
            body.push_str(&format!("<li>{}</li>\n", escape(&record.to_string())));
        }
        body.push_str("</ul>\n");
    }
    page("Crop Recommendation", &body)
}

pub fn contact_page(message: Option<&str>) -> String {
    let mut body = String::from("<h1>Contact</h1>\n");
    body.push_str(&notice(message));
    body.push_str(
        "<form method=\"post\" action=\"/submit_contact\">\n\
         <label>Name <input name=\"name\" required></label>\n\
         <label>Email <input name=\"email\" type=\"email\" required></label>\n\
         <label>Message <textarea name=\"message\" maxlength=\"500\" required></textarea></label>\n\
         <button type=\"submit\">Send</button>\n</form>\n",
    );
    page("Contact", &body)
}

pub fn seed_bank_page() -> String {
    // Seed banks of Maharashtra, with their map embeds.
    const SEED_BANKS: [(&str, &str, &str); 5] = [
        (
            "Pune Seed Bank",
            "Pune, Maharashtra",
            "https://www.google.com/maps/embed?pb=!1m14!1m12!1m3!1d3784.0038044700595!2d73.86548577183774!3d18.48348687031254!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!5e0!3m2!1sen!2sin!4v1742632805893!5m2!1sen!2sin",
        ),
        (
            "Nagpur Seed Bank",
            "Nagpur, Maharashtra",
            "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3721.338383296648!2d79.09282417195038!3d21.138927783992!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3bd4c1170e142483%3A0x46c2d5699c49d547!2sNational%20Seeds%20Corporation%20Ltd.Nagpur!5e0!3m2!1sen!2sin!4v1742633155791!5m2!1sen!2sin",
        ),
        (
            "Nashik Seed Bank",
            "Nashik, Maharashtra",
            "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3749.3901356859387!2d73.79260847189975!3d19.99213422258078!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3bddeb013af2e74b%3A0x93092e5db554ae96!2sNational%20Seeds%20Corporation%20Limited!5e0!3m2!1sen!2sin!4v1742633273462!5m2!1sen!2sin",
        ),
        (
            "Solapur Seed Bank",
            "Solapur, Maharashtra",
            "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d60822.265470464896!2d75.82354782167968!3d17.67895200000001!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3bc5d100324b70ef%3A0x9679bc43c0d51ce8!2sMahabeej%20District%20Office%20Solapur!5e0!3m2!1sen!2sin!4v1742633813975!5m2!1sen!2sin",
        ),
        (
            "Ch. Sambhaji Nagar Seed Bank",
            "Ch. Sambhaji Nagar, Maharashtra",
            "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3751.777694730783!2d75.37697297068496!3d19.891606812290878!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3bdb9815a369bc63%3A0x6461ed227de4b85c!2sNational%20Seeds%20Corporation%20Ltd!5e0!3m2!1sen!2sin!4v1742633613895!5m2!1sen!2sin",
        ),
    ];

    let mut body = String::from("<h1>Seed Banks of Maharashtra</h1>\n");
    for (name, location, map_url) in SEED_BANKS {
        body.push_str(&format!(
            "<section>\n<h2>{name}</h2>\n<p>{location}</p>\n\
             <iframe src=\"{map_url}\" width=\"100%\" height=\"280\" \
             style=\"border:0\" loading=\"lazy\"></iframe>\n</section>\n"
        ));
    }
    page("Seed Banks", &body)
}

pub fn sensor_page(rows: &[SensorReading], status: PumpStatus) -> String {
    let mut body = String::from("<h1>Sensor Data</h1>\n");
    body.push_str(&format!("<p>Pump status: <strong>{status}</strong></p>\n"));
    body.push_str(
        "<table>\n<tr><th>Temperature</th><th>Humidity</th><th>Moisture</th></tr>\n",
    );
    for r in rows {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            r.temperature, r.humidity, r.moisture
        ));
    }
    body.push_str("</table>\n");
    page("Sensor Data", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!("<h1>Error</h1>\n{}", notice(Some(message)));
    page("Error", &body)
}
