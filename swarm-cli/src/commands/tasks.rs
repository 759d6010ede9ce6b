use anyhow::Result;
use swarm_config::SwarmConfig;
use swarm_core::{Task, TaskSet};

/// Render the task catalogue with the weights the configuration resolves to
pub fn render(config: &SwarmConfig) -> Result<String> {
    let weights = TaskSet::from_weights(&config.load.tasks)?;

    let mut out = format!(
        "{:<26} {:<6} {:<16} {:<7} {:<5} {}\n",
        "TASK", "METHOD", "PATH", "STATUS", "AUTH", "WEIGHT"
    );
    for task in Task::all() {
        out.push_str(&format!(
            "{:<26} {:<6} {:<16} {:<7} {:<5} {}\n",
            task.name(),
            task.method().as_str(),
            task.path(),
            task.success_status(),
            if task.requires_token() { "yes" } else { "no" },
            weights.weight_of(*task),
        ));
    }
    Ok(out)
}

pub fn handle(config: &SwarmConfig) -> Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_task_with_weight() {
        let mut config = SwarmConfig::default();
        config.load.tasks.insert("get_books".to_string(), 4);
        config.load.tasks.insert("register".to_string(), 0);

        let table = render(&config).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), Task::all().len() + 1);

        let books = lines.iter().find(|l| l.starts_with("get_books ")).unwrap();
        assert!(books.contains("/v1/books"));
        assert!(books.trim_end().ends_with('4'));

        let register = lines.iter().find(|l| l.starts_with("register ")).unwrap();
        assert!(register.contains("POST"));
        assert!(register.trim_end().ends_with('0'));
    }

    #[test]
    fn test_render_rejects_unknown_task() {
        let mut config = SwarmConfig::default();
        config.load.tasks.insert("teleport".to_string(), 1);
        assert!(render(&config).is_err());
    }
}
