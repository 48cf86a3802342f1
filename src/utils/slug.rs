/// Lowercases the title and replaces each whitespace run with `-`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_space = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.push(ch);
            in_space = false;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("Senior  Frontend\tDeveloper"), "senior-frontend-developer");
    }

    #[test]
    fn keeps_punctuation_and_edges() {
        assert_eq!(slugify(" QA Engineer "), "-qa-engineer-");
        assert_eq!(slugify("C++ Dev"), "c++-dev");
    }
}
