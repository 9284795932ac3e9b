use cstore_types::product::Product;

const COLUMNS: [&str; 5] = ["brand", "name", "price", "event", "category"];

/// Index of the numeric column, right-aligned in the table.
const PRICE_COLUMN: usize = 2;

const SYSTEM_INSTRUCTION_HEAD: &str = "당신은 편의점 행사 상품 전문가입니다. \
아래 제공된 최신 행사 데이터(CSV 형태)를 바탕으로 사용자의 질문에 친절하고 똑똑하게 답변해주세요. \
상품을 추천할 때는 브랜드, 가격, 행사 내용(1+1 등)을 구체적으로 언급해주세요. \
한국어로 답변하세요.";

/// Render products as a header row plus one line per product.
///
/// Columns are brand, name, price, event, category, without an index
/// column. Cells are padded to the widest value in their column (counted
/// in characters); price is right-aligned, everything else left-aligned.
/// Trailing whitespace is trimmed from every line.
pub fn render_context_table(products: &[Product]) -> String {
    let rows: Vec<[String; 5]> = products
        .iter()
        .map(|p| {
            [
                p.brand.clone(),
                p.name.clone(),
                p.price.to_string(),
                p.event.clone(),
                p.category.clone(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &COLUMNS.map(str::to_string), &widths);
    for row in &rows {
        out.push('\n');
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push(' ');
        }
        let pad = width.saturating_sub(cell.chars().count());
        if i == PRICE_COLUMN {
            line.extend(std::iter::repeat_n(' ', pad));
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.extend(std::iter::repeat_n(' ', pad));
        }
    }
    out.push_str(line.trim_end());
}

/// The system instruction for one turn: role, tone, and language
/// directives followed by the rendered context table.
pub fn build_system_instruction(products: &[Product]) -> String {
    format!(
        "{SYSTEM_INSTRUCTION_HEAD}\n\n[행사 데이터 샘플]\n{}",
        render_context_table(products)
    )
}
