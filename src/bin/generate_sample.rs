use rust_xlsxwriter::{Workbook, XlsxError};

use student_profile::data::columns::REQUIRED_COLUMNS;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[lo, hi)`, rounded to `decimals`.
    fn uniform(&mut self, lo: f64, hi: f64, decimals: i32) -> f64 {
        let scale = 10f64.powi(decimals);
        ((lo + (hi - lo) * self.next_f64()) * scale).round() / scale
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// A generated cell: blank cells are left unwritten.
enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

fn student_row(i: usize, rng: &mut SimpleRng) -> Vec<(&'static str, Cell)> {
    const SURNAMES: &[&str] = &["张", "李", "王", "刘", "陈", "杨", "赵", "黄", "周", "吴"];
    const GIVEN: &[&str] = &["伟", "芳", "娜", "敏", "静", "磊", "洋", "艳", "勇", "杰", "涛", "明"];
    const MAJORS: &[&str] = &["飞行器设计与工程", "飞行器动力工程", "飞行器适航技术", "航空航天工程"];
    const COUNSELORS: &[&str] = &["刘老师", "孙老师", "何老师"];
    const POLITICAL: &[&str] = &["共青团员", "群众", "中共预备党员"];
    const ETHNIC: &[&str] = &["汉族", "汉族", "汉族", "回族", "壮族", "苗族"];
    const HARDSHIP: &[&str] = &["一般困难", "困难", "特别困难"];
    const PSYCH: &[&str] = &["3级", "3级", "3级", "2级", "1级"];
    const PHYS_GRADE: &[&str] = &["优秀", "良好", "及格", "不及格"];
    const AWARDS: &[&str] = &["数学建模竞赛省二等奖", "优秀学生干部", "三好学生"];

    let name = format!("{}{}{}", rng.pick(SURNAMES), rng.pick(GIVEN), rng.pick(GIVEN));
    let old_class = format!("航工23{:02}", i % 4 + 1);
    let yes_no = |rng: &mut SimpleRng, p: f64| Cell::Text(String::from(if rng.chance(p) { "是" } else { "否" }));
    let maybe = |rng: &mut SimpleRng, p: f64, options: &[&str]| {
        if rng.chance(p) {
            Cell::Text(rng.pick(options).to_string())
        } else {
            Cell::Blank
        }
    };
    let gpa = |rng: &mut SimpleRng| {
        if rng.chance(0.9) {
            Cell::Number(rng.uniform(2.0, 4.0, 2))
        } else {
            Cell::Blank
        }
    };
    let needs_help = rng.chance(0.15);

    vec![
        ("序号", Cell::Number((i + 1) as f64)),
        ("学号", Cell::Text(format!("2023{:04}", 1001 + i))),
        ("姓名", Cell::Text(name)),
        ("原班级", Cell::Text(old_class)),
        ("新班级", Cell::Text(format!("航工23{:02}", (i + 1) % 4 + 1))),
        ("原专业", Cell::Text(rng.pick(MAJORS).to_string())),
        ("分流专业", Cell::Text(rng.pick(MAJORS).to_string())),
        ("辅导员", Cell::Text(rng.pick(COUNSELORS).to_string())),
        ("政治面貌", Cell::Text(rng.pick(POLITICAL).to_string())),
        ("入团申请书编号", Cell::Text(format!("T{:05}", 20000 + i))),
        ("是否递交入党申请书", yes_no(rng, 0.6)),
        ("是否积极分子", yes_no(rng, 0.3)),
        ("民族", Cell::Text(rng.pick(ETHNIC).to_string())),
        ("性别", Cell::Text(rng.pick(&["男", "女"]).to_string())),
        ("是否过四级", Cell::Number(rng.uniform(380.0, 600.0, 0))),
        ("是否过六级", maybe(rng, 0.5, &["是", "否"])),
        ("第一学期绩点", gpa(rng)),
        ("第二学期绩点", gpa(rng)),
        ("第三学期绩点", gpa(rng)),
        ("第一学年德育", Cell::Number(rng.uniform(12.0, 15.0, 1))),
        ("第一学年智育", Cell::Number(rng.uniform(40.0, 80.0, 1))),
        ("第一学年附加分", Cell::Number(rng.uniform(-1.0, 6.0, 1))),
        ("第一学年体测成绩", Cell::Number(rng.uniform(55.0, 100.0, 1))),
        ("第一学年体测评级", Cell::Text(rng.pick(PHYS_GRADE).to_string())),
        ("第一学年综测总分", Cell::Number(rng.uniform(60.0, 100.0, 2))),
        ("心理评测等级", Cell::Text(rng.pick(PSYCH).to_string())),
        ("第一学年困难等级", maybe(rng, 0.2, HARDSHIP)),
        ("第二学年困难等级", maybe(rng, 0.2, HARDSHIP)),
        (
            "有无需要学院协助解决的困难",
            Cell::Text(String::from(if needs_help { "有" } else { "无" })),
        ),
        (
            "有何困难",
            if needs_help {
                Cell::Text(rng.pick(&["家庭经济困难", "学业压力大", "适应困难"]).to_string())
            } else {
                Cell::Blank
            },
        ),
        ("去年困难生", yes_no(rng, 0.2)),
        ("今年困难生", yes_no(rng, 0.2)),
        ("挂科", Cell::Number(if rng.chance(0.2) { 1.0 } else { 0.0 })),
        ("所获学分", Cell::Number(rng.uniform(40.0, 60.0, 1))),
        ("奖项", maybe(rng, 0.3, AWARDS)),
        ("人民奖学金", maybe(rng, 0.25, &["一等", "二等", "三等"])),
        ("助学奖学金", maybe(rng, 0.1, &["获得"])),
        ("助学金", maybe(rng, 0.2, &["一档", "二档", "三档"])),
    ]
}

fn main() -> Result<(), XlsxError> {
    let mut rng = SimpleRng::new(42);
    let n_students = 60;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (c, header) in REQUIRED_COLUMNS.iter().enumerate() {
        sheet.write_string(0, c as u16, *header)?;
    }

    for i in 0..n_students {
        let row = (i + 1) as u32;
        for (name, cell) in student_row(i, &mut rng) {
            let Some(col) = REQUIRED_COLUMNS.iter().position(|h| *h == name) else {
                continue;
            };
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    sheet.write_string(row, col, &s)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(row, col, n)?;
                }
                Cell::Blank => {}
            }
        }
    }

    let output_path = "sample_students.xlsx";
    workbook.save(output_path)?;

    println!(
        "Wrote {n_students} students ({} columns each) to {output_path}",
        REQUIRED_COLUMNS.len()
    );
    Ok(())
}
