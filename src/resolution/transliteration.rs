/*!
 * Cyrillic to Latin transliteration for catalog queries.
 *
 * Latin-indexed catalogs sometimes list Russian films under a romanized title
 * only. The mapping is a fixed, practical romanization of the Russian alphabet.
 */

/// Latin replacement for a Russian letter, `None` for every other character
fn latin_for(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a", 'б' => "b", 'в' => "v", 'г' => "g", 'д' => "d",
        'е' => "e", 'ё' => "yo", 'ж' => "zh", 'з' => "z", 'и' => "i",
        'й' => "y", 'к' => "k", 'л' => "l", 'м' => "m", 'н' => "n",
        'о' => "o", 'п' => "p", 'р' => "r", 'с' => "s", 'т' => "t",
        'у' => "u", 'ф' => "f", 'х' => "kh", 'ц' => "ts", 'ч' => "ch",
        'ш' => "sh", 'щ' => "shch", 'ъ' => "", 'ы' => "y", 'ь' => "",
        'э' => "e", 'ю' => "yu", 'я' => "ya",

        'А' => "A", 'Б' => "B", 'В' => "V", 'Г' => "G", 'Д' => "D",
        'Е' => "E", 'Ё' => "Yo", 'Ж' => "Zh", 'З' => "Z", 'И' => "I",
        'Й' => "Y", 'К' => "K", 'Л' => "L", 'М' => "M", 'Н' => "N",
        'О' => "O", 'П' => "P", 'Р' => "R", 'С' => "S", 'Т' => "T",
        'У' => "U", 'Ф' => "F", 'Х' => "Kh", 'Ц' => "Ts", 'Ч' => "Ch",
        'Ш' => "Sh", 'Щ' => "Shch", 'Ъ' => "", 'Ы' => "Y", 'Ь' => "",
        'Э' => "E", 'Ю' => "Yu", 'Я' => "Ya",

        _ => return None,
    };
    Some(latin)
}

/// Romanize every Russian letter in `input`, keeping all other characters as-is
pub fn transliterate(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        match latin_for(c) {
            Some(latin) => result.push_str(latin),
            None => result.push(c),
        }
    }
    result
}
