use crate::models::{Lead, RawListing, WebsiteFindings};

/// Merges one directory listing with its (optional) website findings into a
/// Lead. Pure function; both inputs are consumed as-is, never mutated in
/// place.
pub fn merge(listing: RawListing, findings: Option<WebsiteFindings>) -> Lead {
    match findings {
        Some(findings) => Lead {
            business_name: listing.name,
            website: listing.website,
            phone: union_phones(&listing.phone, &findings.phones),
            email: findings.emails.join(", "),
            instagram: findings.socials.instagram,
            facebook: findings.socials.facebook,
            linkedin: findings.socials.linkedin,
            // WhatsApp is not a recognized platform; the column stays empty.
            whatsapp: String::new(),
            rating: listing.rating,
            reviews: listing.review_count,
            category: listing.category,
            quality_score: findings.quality_score,
            notes: findings.notes,
        },
        None => Lead {
            business_name: listing.name,
            website: listing.website,
            phone: listing.phone,
            email: String::new(),
            instagram: String::new(),
            facebook: String::new(),
            linkedin: String::new(),
            whatsapp: String::new(),
            rating: listing.rating,
            reviews: listing.review_count,
            category: listing.category,
            quality_score: 10,
            notes: "No Website listed on Maps.".to_string(),
        },
    }
}

// Set union of the directory phone and website-discovered phones, directory
// phone first, each number exactly once.
fn union_phones(directory_phone: &str, website_phones: &[String]) -> String {
    let mut phones: Vec<String> = Vec::new();
    if !directory_phone.is_empty() {
        phones.push(directory_phone.to_string());
    }
    for phone in website_phones {
        if !phone.is_empty() && !phones.contains(phone) {
            phones.push(phone.clone());
        }
    }
    phones.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SocialLinks;

    fn findings_with(phones: Vec<&str>) -> WebsiteFindings {
        WebsiteFindings {
            source_url: "https://a.com".to_string(),
            emails: vec!["a@a.com".to_string(), "b@a.com".to_string()],
            phones: phones.into_iter().map(String::from).collect(),
            socials: SocialLinks {
                instagram: "https://instagram.com/a".to_string(),
                ..SocialLinks::default()
            },
            quality_score: 5,
            has_booking_signal: false,
            notes: "No booking system detected. ".to_string(),
        }
    }

    #[test]
    fn phone_union_contains_each_number_once() {
        let mut listing = RawListing::named("A Dental");
        listing.phone = "555-1234".to_string();

        let lead = merge(listing, Some(findings_with(vec!["555-1234", "555-5678"])));
        assert_eq!(lead.phone, "555-1234, 555-5678");
    }

    #[test]
    fn emails_are_comma_joined_and_score_copied_verbatim() {
        let lead = merge(RawListing::named("A Dental"), Some(findings_with(vec![])));
        assert_eq!(lead.email, "a@a.com, b@a.com");
        assert_eq!(lead.quality_score, 5);
        assert_eq!(lead.notes, "No booking system detected. ");
    }

    #[test]
    fn socials_flatten_with_whatsapp_always_empty() {
        let lead = merge(RawListing::named("A Dental"), Some(findings_with(vec![])));
        assert_eq!(lead.instagram, "https://instagram.com/a");
        assert_eq!(lead.facebook, "");
        assert_eq!(lead.whatsapp, "");
    }

    #[test]
    fn no_website_forces_score_10_with_maps_note() {
        let mut listing = RawListing::named("B Dental");
        listing.phone = "555-0000".to_string();

        let lead = merge(listing, None);
        assert_eq!(lead.quality_score, 10);
        assert_eq!(lead.notes, "No Website listed on Maps.");
        assert_eq!(lead.phone, "555-0000");
        assert_eq!(lead.email, "");
    }
}
