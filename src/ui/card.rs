//! Event card and details rendering.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use super::theme::{
    COLOR_ACCENT, COLOR_BOOK, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_FEATURED, COLOR_HEADER,
    COLOR_ON_SALE,
};
use crate::currency::format_price_for_event;
use crate::format::{
    card_image_url, compact_lineup_time, format_event_date, format_event_time, format_sale_date,
    formatted_min_price, has_audio_clips, is_event_on_sale, truncate_text, DEFAULT_LOCALE,
};
use crate::models::Event;

/// Minimum width of one card, borders included
pub const CARD_WIDTH: u16 = 34;

/// Height of one card, borders included
pub const CARD_HEIGHT: u16 = 9;

/// Description length shown in the details panel
const DESCRIPTION_LIMIT: usize = 255;

/// The seven content lines of a card.
pub fn card_lines(event: &Event, expanded: bool, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let on_sale = is_event_on_sale(event.sale_start_date.as_deref(), now);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut badges = Vec::new();
    if event.is_featured() {
        badges.push(Span::styled(
            "★ Featured ",
            Style::default().fg(COLOR_FEATURED).add_modifier(Modifier::BOLD),
        ));
    }
    if has_audio_clips(event) {
        badges.push(Span::styled("▶ ", Style::default().fg(COLOR_ACCENT)));
    }
    if on_sale {
        let sale = event.sale_start_date.as_deref();
        badges.push(Span::styled(
            format!(
                "On sale {} {}",
                format_sale_date(sale, DEFAULT_LOCALE),
                format_event_time(sale, DEFAULT_LOCALE)
            ),
            Style::default().fg(COLOR_ON_SALE),
        ));
    }

    let date = format_event_date(event.date.as_deref(), DEFAULT_LOCALE);
    let time = format_event_time(event.date.as_deref(), DEFAULT_LOCALE);
    let when = match (date.is_empty(), time.is_empty()) {
        (true, _) => String::new(),
        (false, true) => date,
        (false, false) => format!("{} — {}", date, time),
    };

    let place = match (event.primary_city(), event.primary_country()) {
        (Some(city), Some(country)) => format!("{}, {}", city, country),
        _ => String::new(),
    };

    let details = if !event.has_details() {
        Line::raw("")
    } else if expanded {
        Line::styled("− Hide details", Style::default().fg(COLOR_DIM))
    } else {
        Line::styled("+ More Info", Style::default().fg(COLOR_DIM))
    };

    let action = if on_sale {
        Span::styled(
            "[GET REMINDED]",
            Style::default().fg(COLOR_ON_SALE).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "[BOOK NOW]",
            Style::default().fg(COLOR_BOOK).add_modifier(Modifier::BOLD),
        )
    };

    vec![
        Line::from(badges),
        Line::raw(when),
        Line::styled(event.name.clone(), bold.fg(COLOR_HEADER)),
        Line::styled(event.venue.clone().unwrap_or_default(), bold),
        Line::raw(place),
        details,
        Line::from(vec![
            action,
            Span::raw("  "),
            Span::raw(format!("From {}", formatted_min_price(event))),
        ]),
    ]
}

pub fn render_card(
    frame: &mut Frame,
    area: Rect,
    event: &Event,
    selected: bool,
    expanded: bool,
    now: DateTime<Utc>,
) {
    let border = if selected {
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_BORDER)
    };
    let block = Block::bordered().border_style(border);
    let paragraph = Paragraph::new(card_lines(event, expanded, now)).block(block);
    frame.render_widget(paragraph, area);
}

/// "More Info" contents: description, LINE UP, TICKETS.
pub fn details_lines(event: &Event) -> Vec<Line<'static>> {
    let heading = Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    if let Some(description) = event.description.as_deref() {
        lines.push(Line::raw(truncate_text(description, DESCRIPTION_LIMIT)));
        lines.push(Line::raw(""));
    }

    if let Some(lineup) = event.lineup.as_deref().filter(|l| !l.is_empty()) {
        lines.push(Line::styled("LINE UP", heading));
        for item in lineup {
            let mut spans = vec![Span::raw(item.details.clone())];
            if let Some(time) = item.time.as_deref() {
                spans.push(Span::styled(
                    format!(" - {}", compact_lineup_time(time)),
                    Style::default().fg(COLOR_DIM),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::raw(""));
    }

    if let Some(tickets) = event.ticket_types.as_deref().filter(|t| !t.is_empty()) {
        lines.push(Line::styled("TICKETS", heading));
        for ticket in tickets {
            let price = if ticket.sold_out {
                Span::styled("SOLD OUT", Style::default().fg(COLOR_ERROR))
            } else {
                Span::styled(
                    format_price_for_event(ticket.price.total as f64 / 100.0, event),
                    Style::default().fg(COLOR_BOOK),
                )
            };
            lines.push(Line::from(vec![
                Span::raw(format!("{} — ", ticket.name)),
                price,
            ]));
        }
        lines.push(Line::raw(""));
    }

    if let Some(url) = card_image_url(event) {
        lines.push(Line::styled(url, Style::default().fg(COLOR_DIM)));
    }

    lines
}

pub fn render_details(frame: &mut Frame, area: Rect, event: &Event) {
    let block = Block::bordered()
        .title(format!(" {} ", event.name))
        .border_style(Style::default().fg(COLOR_ACCENT));
    let paragraph = Paragraph::new(details_lines(event))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineupItem, TicketPrice, TicketType, Venue, VenueCity};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 12, 0, 0).unwrap()
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn ticket(id: &str, name: &str, total: i64, sold_out: bool) -> TicketType {
        TicketType {
            id: id.to_string(),
            name: name.to_string(),
            price: TicketPrice {
                total,
                fees: 0,
                face_value: total,
            },
            sold_out,
        }
    }

    fn london_event() -> Event {
        let mut event = Event::new("1", "Night Shift");
        event.date = Some("2025-12-31T20:00:00Z".to_string());
        event.venue = Some("Roundhouse".to_string());
        event.venues = Some(vec![Venue {
            id: "v1".to_string(),
            name: "Roundhouse".to_string(),
            city: Some(VenueCity {
                name: Some("London".to_string()),
                country_alpha3: Some("GBR".to_string()),
                ..Default::default()
            }),
            url: None,
        }]);
        event
    }

    #[test]
    fn test_basic_card() {
        let lines = text(&card_lines(&london_event(), false, now()));
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Wed 31 Dec — 8:00 pm");
        assert_eq!(lines[2], "Night Shift");
        assert_eq!(lines[3], "Roundhouse");
        assert_eq!(lines[4], "London, GBR");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "[BOOK NOW]  From £12.00");
    }

    #[test]
    fn test_future_sale_shows_reminder() {
        let mut event = london_event();
        event.featured = Some(true);
        event.sale_start_date = Some("2025-12-05T10:00:00Z".to_string());
        let lines = text(&card_lines(&event, false, now()));
        assert!(lines[0].contains("Featured"));
        assert!(lines[0].contains("On sale 5 Dec 10:00 am"));
        assert!(lines[6].starts_with("[GET REMINDED]"));
    }

    #[test]
    fn test_past_sale_is_bookable() {
        let mut event = london_event();
        event.sale_start_date = Some("2025-11-01T10:00:00Z".to_string());
        let lines = text(&card_lines(&event, false, now()));
        assert!(!lines[0].contains("On sale"));
        assert!(lines[6].starts_with("[BOOK NOW]"));
    }

    #[test]
    fn test_price_from_cheapest_tier_in_local_currency() {
        let mut event = Event::new("2", "Fest");
        event.venues = Some(vec![Venue {
            id: "v2".to_string(),
            name: "Venue".to_string(),
            city: Some(VenueCity {
                name: Some("Berlin".to_string()),
                country_alpha3: Some("DEU".to_string()),
                ..Default::default()
            }),
            url: None,
        }]);
        event.ticket_types = Some(vec![
            ticket("a", "GA", 2500, false),
            ticket("b", "Early", 1850, true),
        ]);
        let lines = text(&card_lines(&event, false, now()));
        assert!(lines[6].ends_with("From 18,50\u{a0}€"), "{}", lines[6]);
        assert_eq!(lines[4], "Berlin, DEU");
        assert_eq!(lines[5], "+ More Info");
    }

    #[test]
    fn test_missing_city_hides_place_line() {
        let mut event = Event::new("3", "Gig");
        event.venues = Some(vec![Venue {
            id: "v2".to_string(),
            name: "Venue".to_string(),
            city: Some(VenueCity {
                name: Some("Paris".to_string()),
                ..Default::default()
            }),
            url: None,
        }]);
        let lines = text(&card_lines(&event, false, now()));
        assert_eq!(lines[1], "");
        assert_eq!(lines[4], "");
    }

    #[test]
    fn test_expanded_marker() {
        let mut event = london_event();
        event.description = Some("Doors 7pm".to_string());
        let lines = text(&card_lines(&event, true, now()));
        assert_eq!(lines[5], "− Hide details");
    }

    #[test]
    fn test_details_sections() {
        let mut event = london_event();
        event.description = Some("word ".repeat(80));
        event.lineup = Some(vec![
            LineupItem {
                details: "Doors open".to_string(),
                time: Some("7:00 PM".to_string()),
            },
            LineupItem {
                details: "Headliner".to_string(),
                time: None,
            },
        ]);
        event.ticket_types = Some(vec![
            ticket("a", "General Admission", 2250, false),
            ticket("b", "VIP", 9000, true),
        ]);

        let lines = text(&details_lines(&event));
        assert!(lines[0].ends_with("..."));
        assert!(lines[0].chars().count() <= 258);
        assert!(lines.contains(&"LINE UP".to_string()));
        assert!(lines.contains(&"Doors open - 7pm".to_string()));
        assert!(lines.contains(&"Headliner".to_string()));
        assert!(lines.contains(&"TICKETS".to_string()));
        assert!(lines.contains(&"General Admission — £22.50".to_string()));
        assert!(lines.contains(&"VIP — SOLD OUT".to_string()));
    }

    #[test]
    fn test_details_image_url() {
        let mut event = Event::new("4", "Gig");
        event.event_images = Some(crate::models::EventImages {
            square: Some("https://img.test/sq.jpg".to_string()),
            landscape: None,
        });
        let lines = text(&details_lines(&event));
        assert_eq!(
            lines,
            vec!["https://img.test/sq.jpg?w=400&h=400&fit=crop&auto=format,compress".to_string()]
        );
    }
}
